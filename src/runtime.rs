//! Pipeline orchestration: layout, fit, resolve, derive, serialize, and
//! optionally compile, in that order. Each invocation owns its resolved and
//! derived structures; nothing is cached across calls.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::canvas;
use crate::compile::{self, CompileOptions};
use crate::error::PlotError;
use crate::geometry;
use crate::graph::{self, GraphView};
use crate::ir::{CanvasSpec, Coordinate, RenderModel};
use crate::resolve;
use crate::serialize::{self, OutputTarget};
use crate::style::{StyleDefaults, VisualStyle};
use crate::units::{self, Unit};

const DEFAULT_BASE_NAME: &str = "network";

/// Files produced by a `plot` call.
#[derive(Debug, Clone, Default)]
pub struct PlotOutcome {
    pub written: Vec<PathBuf>,
}

/// Render a graph to the requested output.
///
/// The target kind follows the output name's suffix (`.tex`, `.csv`,
/// `.pdf`). With no output name, markup and tables are written under the
/// default base name and the compiler is never invoked.
pub fn plot<G: GraphView>(
    graph: &G,
    output: Option<&Path>,
    style: &VisualStyle,
) -> Result<PlotOutcome, PlotError> {
    plot_with_compiler(graph, output, style, &CompileOptions::default())
}

/// `plot`, with control over the external compiler invocation.
pub fn plot_with_compiler<G: GraphView>(
    graph: &G,
    output: Option<&Path>,
    style: &VisualStyle,
    compile_options: &CompileOptions,
) -> Result<PlotOutcome, PlotError> {
    // Resolve the target first so a bad request fails before any work
    let target = output.map(OutputTarget::from_name).transpose()?;
    let model = build_model(graph, style)?;

    let mut outcome = PlotOutcome::default();
    match (target, output) {
        (Some(OutputTarget::Markup), Some(path)) => {
            serialize::write_markup(&model, path)?;
            outcome.written.push(path.to_path_buf());
        }
        (Some(OutputTarget::Tabular), Some(path)) => {
            let (nodes_path, edges_path) = serialize::table_paths(path);
            serialize::write_tables(&model, &nodes_path, &edges_path)?;
            outcome.written.push(nodes_path);
            outcome.written.push(edges_path);
        }
        (Some(OutputTarget::Document), Some(path)) => {
            let markup = serialize::render_markup(&model);
            compile::compile(&markup, path, compile_options)?;
            outcome.written.push(path.to_path_buf());
        }
        _ => {
            // No output name: every textual kind under the default base name
            let tex = PathBuf::from(format!("{}.tex", DEFAULT_BASE_NAME));
            serialize::write_markup(&model, &tex)?;
            outcome.written.push(tex);
            let (nodes_path, edges_path) =
                serialize::table_paths(Path::new(&format!("{}.csv", DEFAULT_BASE_NAME)));
            serialize::write_tables(&model, &nodes_path, &edges_path)?;
            outcome.written.push(nodes_path);
            outcome.written.push(edges_path);
        }
    }
    Ok(outcome)
}

/// Compute node coordinates without rendering anything, for callers that
/// want to precompute or cache a layout.
pub fn layout<G: GraphView>(
    graph: &G,
    style: &VisualStyle,
) -> Result<BTreeMap<String, Coordinate>, PlotError> {
    graph::validate(graph)?;
    let defaults = StyleDefaults::default();
    let seed = style.seed.unwrap_or(defaults.seed);
    let coords = crate::layout::resolve_layout(graph, style.layout.as_ref(), seed)?;
    Ok(graph.node_ids().into_iter().zip(coords).collect())
}

/// Run every pure pipeline stage, producing the model the serializers
/// consume. Coordinates and canvas come out in centimeters.
pub fn build_model<G: GraphView>(
    graph: &G,
    style: &VisualStyle,
) -> Result<RenderModel, PlotError> {
    graph::validate(graph)?;
    let defaults = StyleDefaults::default();

    let unit = match &style.unit {
        Some(name) => Unit::parse(name)?,
        None => defaults.unit,
    };
    let seed = style.seed.unwrap_or(defaults.seed);

    // 1. Layout
    let coords = crate::layout::resolve_layout(graph, style.layout.as_ref(), seed)?;

    // 2. Canvas fitting, in the configured unit
    let canvas = style.canvas.map(|(width, height)| CanvasSpec { width, height });
    let margin = style
        .margin
        .as_ref()
        .map(|m| m.to_margin())
        .unwrap_or_default();
    let keep_aspect_ratio = style
        .keep_aspect_ratio
        .unwrap_or(defaults.keep_aspect_ratio);
    let fitted = canvas::fit(coords, canvas, margin, keep_aspect_ratio)?;

    // 3. Convert positions and canvas to the canonical unit
    let scale = units::convert(1.0, unit, Unit::Cm);
    let coords_cm: Vec<Coordinate> = fitted
        .into_iter()
        .map(|c| Coordinate::new(c.x * scale, c.y * scale))
        .collect();
    let canvas_cm = canvas.map(|c| CanvasSpec {
        width: c.width * scale,
        height: c.height * scale,
    });

    // 4. Style resolution
    let nodes = resolve::resolve_nodes(graph, &coords_cm, style)?;
    let edges = resolve::resolve_edges(graph, style)?;

    // 5. Render geometry
    let geometry = geometry::derive(&edges, &defaults);

    Ok(RenderModel {
        nodes,
        edges,
        geometry,
        canvas: canvas_cm,
        unit,
    })
}
