//! Style resolution: collapse raw scalar/sequence/override options into one
//! fully-determined attribute record per node and per edge.
//!
//! Precedence per element, highest first: sparse override, ordered sequence,
//! scalar, built-in default. An explicit null inside a sequence or override
//! means "unset", which falls through to the default. Color, shape, and
//! style strings pass through opaquely; whether they mean anything is the
//! downstream renderer's problem.

use crate::error::PlotError;
use crate::graph::GraphView;
use crate::ir::{Coordinate, ResolvedEdge, ResolvedNode};
use crate::style::{StyleValue, Text, VisualStyle};

/// Resolve one option to a value per element.
///
/// `ids` is the canonical element order; override keys match an element's id
/// first, then its stringified canonical index. The returned vector is
/// index-aligned with `ids`.
pub fn resolve_option<T: Clone>(
    option: &'static str,
    value: Option<&StyleValue<T>>,
    ids: &[String],
    default: Option<T>,
) -> Result<Vec<Option<T>>, PlotError> {
    match value {
        None => Ok(vec![default; ids.len()]),
        Some(StyleValue::Scalar(v)) => Ok(vec![Some(v.clone()); ids.len()]),
        Some(StyleValue::Sequence(values)) => {
            if values.len() != ids.len() {
                return Err(PlotError::LengthMismatch {
                    option,
                    expected: ids.len(),
                    got: values.len(),
                });
            }
            Ok(values
                .iter()
                .map(|v| v.clone().or_else(|| default.clone()))
                .collect())
        }
        Some(StyleValue::Overrides(map)) => Ok(ids
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let entry = map.get(id).or_else(|| map.get(&i.to_string()));
                match entry {
                    Some(Some(v)) => Some(v.clone()),
                    // Explicit null: unset, use the default
                    Some(None) | None => default.clone(),
                }
            })
            .collect()),
    }
}

/// Boolean flag options resolve to concrete values, defaulting to false.
fn resolve_flag(
    option: &'static str,
    value: Option<&StyleValue<bool>>,
    ids: &[String],
) -> Result<Vec<bool>, PlotError> {
    let resolved = resolve_option(option, value, ids, Some(false))?;
    Ok(resolved.into_iter().map(|v| v.unwrap_or(false)).collect())
}

fn into_strings(values: Vec<Option<Text>>) -> Vec<Option<String>> {
    values.into_iter().map(|v| v.map(|t| t.0)).collect()
}

/// Resolve every node option against the canonical node order.
pub fn resolve_nodes<G: GraphView>(
    graph: &G,
    coords: &[Coordinate],
    style: &VisualStyle,
) -> Result<Vec<ResolvedNode>, PlotError> {
    let ids = graph.node_ids();

    let size = resolve_option("vertex_size", style.vertex_size.as_ref(), &ids, None)?;
    let color = resolve_option("vertex_color", style.vertex_color.as_ref(), &ids, None)?;
    let opacity = resolve_option("vertex_opacity", style.vertex_opacity.as_ref(), &ids, None)?;
    let label = into_strings(resolve_option(
        "vertex_label",
        style.vertex_label.as_ref(),
        &ids,
        None,
    )?);
    let label_position = resolve_option(
        "vertex_label_position",
        style.vertex_label_position.as_ref(),
        &ids,
        None,
    )?;
    let label_distance = resolve_option(
        "vertex_label_distance",
        style.vertex_label_distance.as_ref(),
        &ids,
        None,
    )?;
    let label_color = resolve_option(
        "vertex_label_color",
        style.vertex_label_color.as_ref(),
        &ids,
        None,
    )?;
    let label_size = resolve_option(
        "vertex_label_size",
        style.vertex_label_size.as_ref(),
        &ids,
        None,
    )?;
    let shape = resolve_option("vertex_shape", style.vertex_shape.as_ref(), &ids, None)?;
    let node_style = resolve_option("vertex_style", style.vertex_style.as_ref(), &ids, None)?;
    let label_off = resolve_flag("vertex_label_off", style.vertex_label_off.as_ref(), &ids)?;
    let math_mode = resolve_flag("vertex_math_mode", style.vertex_math_mode.as_ref(), &ids)?;
    let label_as_id = resolve_flag(
        "vertex_label_as_id",
        style.vertex_label_as_id.as_ref(),
        &ids,
    )?;
    let pseudo = resolve_flag("vertex_pseudo", style.vertex_pseudo.as_ref(), &ids)?;

    Ok(ids
        .into_iter()
        .enumerate()
        .map(|(i, id)| ResolvedNode {
            id,
            coord: coords[i],
            size: size[i],
            color: color[i].clone(),
            opacity: opacity[i],
            label: label[i].clone(),
            label_position: label_position[i].clone(),
            label_distance: label_distance[i],
            label_color: label_color[i].clone(),
            label_size: label_size[i],
            shape: shape[i].clone(),
            style: node_style[i].clone(),
            label_off: label_off[i],
            math_mode: math_mode[i],
            label_as_id: label_as_id[i],
            pseudo: pseudo[i],
        })
        .collect())
}

/// Resolve every edge option against the canonical edge order. Edges are
/// keyed by canonical index in override maps.
pub fn resolve_edges<G: GraphView>(
    graph: &G,
    style: &VisualStyle,
) -> Result<Vec<ResolvedEdge>, PlotError> {
    let edges = graph.edges();
    let ids: Vec<String> = (0..edges.len()).map(|i| i.to_string()).collect();

    let width = resolve_option("edge_width", style.edge_width.as_ref(), &ids, None)?;
    let color = resolve_option("edge_color", style.edge_color.as_ref(), &ids, None)?;
    let opacity = resolve_option("edge_opacity", style.edge_opacity.as_ref(), &ids, None)?;
    let curved = resolve_option("edge_curved", style.edge_curved.as_ref(), &ids, Some(0.0))?;
    let label = into_strings(resolve_option(
        "edge_label",
        style.edge_label.as_ref(),
        &ids,
        None,
    )?);
    let label_position = resolve_option(
        "edge_label_position",
        style.edge_label_position.as_ref(),
        &ids,
        None,
    )?;
    let label_distance = resolve_option(
        "edge_label_distance",
        style.edge_label_distance.as_ref(),
        &ids,
        None,
    )?;
    let label_color = resolve_option(
        "edge_label_color",
        style.edge_label_color.as_ref(),
        &ids,
        None,
    )?;
    let label_size = resolve_option(
        "edge_label_size",
        style.edge_label_size.as_ref(),
        &ids,
        None,
    )?;
    let edge_style = resolve_option("edge_style", style.edge_style.as_ref(), &ids, None)?;
    let arrow_size = resolve_option(
        "edge_arrow_size",
        style.edge_arrow_size.as_ref(),
        &ids,
        None,
    )?;
    let arrow_width = resolve_option(
        "edge_arrow_width",
        style.edge_arrow_width.as_ref(),
        &ids,
        None,
    )?;
    let loop_size = resolve_option("edge_loop_size", style.edge_loop_size.as_ref(), &ids, None)?;
    let loop_position = resolve_option(
        "edge_loop_position",
        style.edge_loop_position.as_ref(),
        &ids,
        None,
    )?;
    let loop_shape = resolve_option(
        "edge_loop_shape",
        style.edge_loop_shape.as_ref(),
        &ids,
        None,
    )?;
    // Per-edge directedness override, falling back to the graph-level flag
    let directed = resolve_option(
        "edge_directed",
        style.edge_directed.as_ref(),
        &ids,
        Some(graph.is_directed()),
    )?;
    let math_mode = resolve_flag("edge_math_mode", style.edge_math_mode.as_ref(), &ids)?;
    let not_in_bg = resolve_flag("edge_not_in_bg", style.edge_not_in_bg.as_ref(), &ids)?;

    Ok(edges
        .into_iter()
        .enumerate()
        .map(|(i, edge)| ResolvedEdge {
            source: edge.source,
            target: edge.target,
            directed: directed[i].unwrap_or(false),
            width: width[i],
            color: color[i].clone(),
            opacity: opacity[i],
            curved: curved[i].unwrap_or(0.0),
            label: label[i].clone(),
            label_position: label_position[i].clone(),
            label_distance: label_distance[i],
            label_color: label_color[i].clone(),
            label_size: label_size[i],
            style: edge_style[i].clone(),
            arrow_size: arrow_size[i],
            arrow_width: arrow_width[i],
            loop_size: loop_size[i],
            loop_position: loop_position[i],
            loop_shape: loop_shape[i],
            math_mode: math_mode[i],
            not_in_bg: not_in_bg[i],
        })
        .collect())
}
