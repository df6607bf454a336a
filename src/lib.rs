// Library exports for tikznet

pub mod canvas;
pub mod compile;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod ir;
pub mod layout;
pub mod parser;
pub mod resolve;
pub mod runtime;
pub mod serialize;
pub mod style;
pub mod units;

pub use error::PlotError;
pub use graph::{Edge, Graph, GraphView};
pub use ir::Coordinate;
pub use runtime::{layout, plot, plot_with_compiler, PlotOutcome};
pub use serialize::OutputTarget;
pub use style::{LayoutSpec, MarginSpec, StyleValue, VisualStyle};
pub use units::Unit;
