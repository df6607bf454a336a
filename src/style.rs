//! Raw style configuration.
//!
//! Every visual option arrives in one of three shapes: a scalar applied to
//! all elements, a sequence aligned with the canonical element order, or a
//! sparse per-id override map. `StyleValue` keeps that shape as a tagged
//! variant until resolution; unknown option names in a JSON configuration
//! are dropped on intake.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};

use crate::ir::Margin;
use crate::units::Unit;

/// Label text. Accepts strings, numbers, and booleans on intake, mirroring
/// the loosely-typed configurations this replaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text(pub String);

impl Text {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Text(value.to_string())
    }
}

impl From<String> for Text {
    fn from(value: String) -> Self {
        Text(value)
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct TextVisitor;

impl<'de> Visitor<'de> for TextVisitor {
    type Value = Text;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string, number, or boolean")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Text, E> {
        Ok(Text(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Text, E> {
        Ok(Text(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Text, E> {
        Ok(Text(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Text, E> {
        Ok(Text(v.to_string()))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Text, E> {
        Ok(Text(v.to_string()))
    }
}

impl<'de> Deserialize<'de> for Text {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Text, D::Error> {
        deserializer.deserialize_any(TextVisitor)
    }
}

/// One style option in its raw, shape-preserving form.
///
/// A `None` inside a sequence or override map means "explicitly unset": the
/// element falls through to the built-in default instead of inheriting a
/// scalar.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StyleValue<T> {
    Scalar(T),
    Sequence(Vec<Option<T>>),
    Overrides(BTreeMap<String, Option<T>>),
}

impl<T> StyleValue<T> {
    pub fn scalar(value: T) -> Self {
        StyleValue::Scalar(value)
    }

    pub fn sequence(values: impl IntoIterator<Item = T>) -> Self {
        StyleValue::Sequence(values.into_iter().map(Some).collect())
    }

    pub fn overrides(entries: impl IntoIterator<Item = (String, Option<T>)>) -> Self {
        StyleValue::Overrides(entries.into_iter().collect())
    }
}

/// Node positions, either supplied directly or named after an algorithm.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LayoutSpec {
    Algorithm(String),
    /// Keyed by node id or stringified canonical index.
    Coordinates(BTreeMap<String, (f64, f64)>),
}

/// Margin option: one number for all four sides, or per-side values with
/// unspecified sides defaulting to zero.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MarginSpec {
    Uniform(f64),
    Sides {
        #[serde(default)]
        top: f64,
        #[serde(default)]
        bottom: f64,
        #[serde(default)]
        left: f64,
        #[serde(default)]
        right: f64,
    },
}

impl MarginSpec {
    pub fn to_margin(&self) -> Margin {
        match *self {
            MarginSpec::Uniform(value) => Margin::uniform(value),
            MarginSpec::Sides {
                top,
                bottom,
                left,
                right,
            } => Margin {
                top,
                bottom,
                left,
                right,
            },
        }
    }
}

/// The full recognized option set.
///
/// Fields left `None` fall back to the built-in defaults during resolution.
/// Deserializing from JSON ignores unrecognized keys, so configurations
/// written for a newer or older vocabulary still load.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VisualStyle {
    // node options
    pub vertex_size: Option<StyleValue<f64>>,
    pub vertex_color: Option<StyleValue<String>>,
    pub vertex_opacity: Option<StyleValue<f64>>,
    pub vertex_label: Option<StyleValue<Text>>,
    pub vertex_label_position: Option<StyleValue<String>>,
    pub vertex_label_distance: Option<StyleValue<f64>>,
    pub vertex_label_color: Option<StyleValue<String>>,
    pub vertex_label_size: Option<StyleValue<f64>>,
    pub vertex_shape: Option<StyleValue<String>>,
    pub vertex_style: Option<StyleValue<String>>,
    pub vertex_label_off: Option<StyleValue<bool>>,
    pub vertex_math_mode: Option<StyleValue<bool>>,
    pub vertex_label_as_id: Option<StyleValue<bool>>,
    pub vertex_pseudo: Option<StyleValue<bool>>,

    // edge options
    pub edge_width: Option<StyleValue<f64>>,
    pub edge_color: Option<StyleValue<String>>,
    pub edge_opacity: Option<StyleValue<f64>>,
    pub edge_curved: Option<StyleValue<f64>>,
    pub edge_label: Option<StyleValue<Text>>,
    pub edge_label_position: Option<StyleValue<String>>,
    pub edge_label_distance: Option<StyleValue<f64>>,
    pub edge_label_color: Option<StyleValue<String>>,
    pub edge_label_size: Option<StyleValue<f64>>,
    pub edge_style: Option<StyleValue<String>>,
    pub edge_arrow_size: Option<StyleValue<f64>>,
    pub edge_arrow_width: Option<StyleValue<f64>>,
    pub edge_loop_size: Option<StyleValue<f64>>,
    pub edge_loop_position: Option<StyleValue<f64>>,
    pub edge_loop_shape: Option<StyleValue<f64>>,
    pub edge_directed: Option<StyleValue<bool>>,
    pub edge_math_mode: Option<StyleValue<bool>>,
    pub edge_not_in_bg: Option<StyleValue<bool>>,

    // general options
    pub layout: Option<LayoutSpec>,
    pub seed: Option<u64>,
    pub unit: Option<String>,
    pub margin: Option<MarginSpec>,
    pub canvas: Option<(f64, f64)>,
    pub keep_aspect_ratio: Option<bool>,
}

impl VisualStyle {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Built-in defaults, constructed once per invocation and passed by
/// reference into the resolver and geometry engine.
#[derive(Debug, Clone)]
pub struct StyleDefaults {
    pub curved: f64,
    /// Base curvature for spreading parallel edges when `edge_curved` is 0.
    pub parallel_curve: f64,
    pub loop_size: f64,
    pub loop_position: f64,
    pub loop_shape: f64,
    pub seed: u64,
    pub unit: Unit,
    pub keep_aspect_ratio: bool,
}

impl Default for StyleDefaults {
    fn default() -> Self {
        StyleDefaults {
            curved: 0.0,
            parallel_curve: 0.3,
            loop_size: 1.0,
            loop_position: 0.0,
            loop_shape: 45.0,
            seed: 42,
            unit: Unit::Cm,
            keep_aspect_ratio: true,
        }
    }
}
