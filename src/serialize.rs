//! Serialization of the resolved model: tikz-network markup and flat CSV
//! tables, selected by the requested output name's suffix.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::PlotError;
use crate::ir::{EdgeGeometry, RenderModel, ResolvedEdge, ResolvedNode};

/// What the requested output name asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputTarget {
    /// A `.tex` document of tikz-network markup.
    Markup,
    /// Flat per-element CSV tables.
    Tabular,
    /// Markup compiled to a PDF by the external compiler.
    Document,
}

impl OutputTarget {
    pub fn from_name(path: &Path) -> Result<Self, PlotError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("tex") => Ok(OutputTarget::Markup),
            Some("csv") => Ok(OutputTarget::Tabular),
            Some("pdf") => Ok(OutputTarget::Document),
            _ => Err(PlotError::UnsupportedTarget(
                path.to_string_lossy().into_owned(),
            )),
        }
    }
}

/// Format a number the way it appears in both outputs: at most three
/// decimals, trailing zeros trimmed.
pub fn fmt_num(value: f64) -> String {
    let s = format!("{:.3}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "" | "-" | "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Labels containing option-list syntax need brace protection.
fn fmt_label(label: &str) -> String {
    if label.contains(',') || label.contains('=') {
        format!("{{{}}}", label)
    } else {
        label.to_string()
    }
}

/// Render the complete markup document.
pub fn render_markup(model: &RenderModel) -> String {
    let mut out = String::new();
    out.push_str("\\documentclass{standalone}\n");
    out.push_str("\\usepackage{tikz-network}\n");
    out.push_str("\\begin{document}\n");
    out.push_str("\\begin{tikzpicture}\n");
    if let Some(canvas) = model.canvas {
        out.push_str(&format!(
            "\\clip (0,0) rectangle ({},{});\n",
            fmt_num(canvas.width),
            fmt_num(canvas.height)
        ));
    }
    for node in &model.nodes {
        out.push_str(&vertex_line(node));
        out.push('\n');
    }
    for (edge, geometry) in model.edges.iter().zip(model.geometry.iter()) {
        out.push_str(&edge_line(edge, geometry, model));
        out.push('\n');
    }
    out.push_str("\\end{tikzpicture}\n");
    out.push_str("\\end{document}\n");
    out
}

fn vertex_line(node: &ResolvedNode) -> String {
    let mut opts = vec![
        format!("x={}", fmt_num(node.coord.x)),
        format!("y={}", fmt_num(node.coord.y)),
    ];
    if let Some(size) = node.size {
        opts.push(format!("size={}", fmt_num(size)));
    }
    if let Some(color) = &node.color {
        opts.push(format!("color={}", color));
    }
    if let Some(opacity) = node.opacity {
        opts.push(format!("opacity={}", fmt_num(opacity)));
    }
    if !node.label_off && !node.label_as_id {
        if let Some(label) = &node.label {
            opts.push(format!("label={}", fmt_label(label)));
        }
    }
    if let Some(position) = &node.label_position {
        opts.push(format!("position={}", position));
    }
    if let Some(distance) = node.label_distance {
        opts.push(format!("distance={}", fmt_num(distance)));
    }
    if let Some(color) = &node.label_color {
        opts.push(format!("fontcolor={}", color));
    }
    if let Some(size) = node.label_size {
        opts.push(format!("fontscale={}", fmt_num(size)));
    }
    if let Some(shape) = &node.shape {
        opts.push(format!("shape={}", shape));
    }
    if let Some(style) = &node.style {
        opts.push(format!("style={{{}}}", style));
    }
    if node.label_off {
        opts.push("NoLabel".to_string());
    }
    if node.label_as_id {
        opts.push("IdAsLabel".to_string());
    }
    if node.math_mode {
        opts.push("Math".to_string());
    }
    if node.pseudo {
        opts.push("Pseudo".to_string());
    }
    format!("\\Vertex[{}]{{{}}}", opts.join(","), node.id)
}

fn edge_line(edge: &ResolvedEdge, geometry: &EdgeGeometry, model: &RenderModel) -> String {
    let mut opts = Vec::new();
    if let Some(width) = edge.width {
        opts.push(format!("lw={}", fmt_num(width)));
    }
    if let Some(color) = &edge.color {
        opts.push(format!("color={}", color));
    }
    if let Some(opacity) = edge.opacity {
        opts.push(format!("opacity={}", fmt_num(opacity)));
    }
    if let Some(label) = &edge.label {
        opts.push(format!("label={}", fmt_label(label)));
    }
    if let Some(position) = &edge.label_position {
        opts.push(format!("position={}", position));
    }
    if let Some(distance) = edge.label_distance {
        opts.push(format!("distance={}", fmt_num(distance)));
    }
    if let Some(color) = &edge.label_color {
        opts.push(format!("fontcolor={}", color));
    }
    if let Some(size) = edge.label_size {
        opts.push(format!("fontscale={}", fmt_num(size)));
    }
    if let Some(style) = style_option(edge, geometry, model) {
        opts.push(format!("style={{{}}}", style));
    }
    if geometry.bend != 0.0 {
        opts.push(format!("bend={}", fmt_num(geometry.bend)));
    }
    if let Some(lg) = geometry.loop_geometry {
        opts.push(format!("loopsize={}{}", fmt_num(lg.size), model.unit));
        opts.push(format!("loopposition={}", fmt_num(lg.position)));
        opts.push(format!("loopshape={}", fmt_num(lg.shape)));
    }
    if edge.directed {
        opts.push("Direct".to_string());
    }
    if edge.math_mode {
        opts.push("Math".to_string());
    }
    if edge.not_in_bg {
        opts.push("NotInBG".to_string());
    }
    format!(
        "\\Edge[{}]({})({})",
        opts.join(","),
        edge.source,
        edge.target
    )
}

/// The edge style string, with an explicit arrow tip appended when the
/// resolved arrow dimensions ask for one.
fn style_option(
    edge: &ResolvedEdge,
    geometry: &EdgeGeometry,
    model: &RenderModel,
) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(style) = &edge.style {
        parts.push(style.clone());
    }
    if let Some(arrow) = geometry.arrow {
        if arrow.length.is_some() || arrow.width.is_some() {
            let mut tip = Vec::new();
            if let Some(length) = arrow.length {
                tip.push(format!("length={}{}", fmt_num(length), model.unit));
            }
            if let Some(width) = arrow.width {
                tip.push(format!("width={}{}", fmt_num(width), model.unit));
            }
            parts.push(format!("-{{Latex[{}]}}", tip.join(",")));
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(","))
    }
}

pub fn write_markup(model: &RenderModel, path: &Path) -> Result<(), PlotError> {
    fs::write(path, render_markup(model))?;
    Ok(())
}

/// Node and edge table paths derived from a requested `.csv` name.
pub fn table_paths(path: &Path) -> (PathBuf, PathBuf) {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("network");
    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    (
        dir.join(format!("{}_nodes.csv", stem)),
        dir.join(format!("{}_edges.csv", stem)),
    )
}

#[derive(Debug, Serialize)]
struct NodeRow<'a> {
    id: &'a str,
    x: String,
    y: String,
    size: Option<String>,
    color: Option<&'a str>,
    opacity: Option<String>,
    label: Option<&'a str>,
    label_position: Option<&'a str>,
    label_distance: Option<String>,
    label_color: Option<&'a str>,
    label_size: Option<String>,
    shape: Option<&'a str>,
    style: Option<&'a str>,
    label_off: bool,
    math_mode: bool,
    label_as_id: bool,
    pseudo: bool,
}

#[derive(Debug, Serialize)]
struct EdgeRow<'a> {
    source: &'a str,
    target: &'a str,
    directed: bool,
    width: Option<String>,
    color: Option<&'a str>,
    opacity: Option<String>,
    label: Option<&'a str>,
    label_position: Option<&'a str>,
    label_distance: Option<String>,
    label_color: Option<&'a str>,
    label_size: Option<String>,
    style: Option<&'a str>,
    bend: String,
    loop_size: Option<String>,
    loop_position: Option<String>,
    loop_shape: Option<String>,
    arrow_length: Option<String>,
    arrow_width: Option<String>,
    math_mode: bool,
    not_in_bg: bool,
}

/// Write the node and edge tables. Numbers are formatted exactly as in the
/// markup output so the two representations can be diffed against each
/// other.
pub fn write_tables(
    model: &RenderModel,
    nodes_path: &Path,
    edges_path: &Path,
) -> Result<(), PlotError> {
    let mut nodes = csv::Writer::from_path(nodes_path)?;
    for node in &model.nodes {
        nodes.serialize(NodeRow {
            id: &node.id,
            x: fmt_num(node.coord.x),
            y: fmt_num(node.coord.y),
            size: node.size.map(fmt_num),
            color: node.color.as_deref(),
            opacity: node.opacity.map(fmt_num),
            label: node.label.as_deref(),
            label_position: node.label_position.as_deref(),
            label_distance: node.label_distance.map(fmt_num),
            label_color: node.label_color.as_deref(),
            label_size: node.label_size.map(fmt_num),
            shape: node.shape.as_deref(),
            style: node.style.as_deref(),
            label_off: node.label_off,
            math_mode: node.math_mode,
            label_as_id: node.label_as_id,
            pseudo: node.pseudo,
        })?;
    }
    nodes.flush()?;

    let mut edges = csv::Writer::from_path(edges_path)?;
    for (edge, geometry) in model.edges.iter().zip(model.geometry.iter()) {
        let arrow = geometry.arrow.unwrap_or_default();
        edges.serialize(EdgeRow {
            source: &edge.source,
            target: &edge.target,
            directed: edge.directed,
            width: edge.width.map(fmt_num),
            color: edge.color.as_deref(),
            opacity: edge.opacity.map(fmt_num),
            label: edge.label.as_deref(),
            label_position: edge.label_position.as_deref(),
            label_distance: edge.label_distance.map(fmt_num),
            label_color: edge.label_color.as_deref(),
            label_size: edge.label_size.map(fmt_num),
            style: edge.style.as_deref(),
            bend: fmt_num(geometry.bend),
            loop_size: geometry.loop_geometry.map(|lg| fmt_num(lg.size)),
            loop_position: geometry.loop_geometry.map(|lg| fmt_num(lg.position)),
            loop_shape: geometry.loop_geometry.map(|lg| fmt_num(lg.shape)),
            arrow_length: arrow.length.map(fmt_num),
            arrow_width: arrow.width.map(fmt_num),
            math_mode: edge.math_mode,
            not_in_bg: edge.not_in_bg,
        })?;
    }
    edges.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{
        ArrowGeometry, CanvasSpec, Coordinate, EdgeGeometry, LoopGeometry, RenderModel,
        ResolvedEdge, ResolvedNode,
    };
    use crate::units::Unit;

    fn node(id: &str, x: f64, y: f64) -> ResolvedNode {
        ResolvedNode {
            id: id.to_string(),
            coord: Coordinate::new(x, y),
            size: None,
            color: None,
            opacity: None,
            label: None,
            label_position: None,
            label_distance: None,
            label_color: None,
            label_size: None,
            shape: None,
            style: None,
            label_off: false,
            math_mode: false,
            label_as_id: false,
            pseudo: false,
        }
    }

    fn edge(source: &str, target: &str) -> ResolvedEdge {
        ResolvedEdge {
            source: source.to_string(),
            target: target.to_string(),
            directed: false,
            width: None,
            color: None,
            opacity: None,
            curved: 0.0,
            label: None,
            label_position: None,
            label_distance: None,
            label_color: None,
            label_size: None,
            style: None,
            arrow_size: None,
            arrow_width: None,
            loop_size: None,
            loop_position: None,
            loop_shape: None,
            math_mode: false,
            not_in_bg: false,
        }
    }

    fn model(nodes: Vec<ResolvedNode>, edges: Vec<ResolvedEdge>) -> RenderModel {
        let geometry = vec![EdgeGeometry::default(); edges.len()];
        RenderModel {
            nodes,
            edges,
            geometry,
            canvas: None,
            unit: Unit::Cm,
        }
    }

    #[test]
    fn test_target_from_name() {
        assert_eq!(
            OutputTarget::from_name(Path::new("network.tex")).unwrap(),
            OutputTarget::Markup
        );
        assert_eq!(
            OutputTarget::from_name(Path::new("network.csv")).unwrap(),
            OutputTarget::Tabular
        );
        assert_eq!(
            OutputTarget::from_name(Path::new("out/network.pdf")).unwrap(),
            OutputTarget::Document
        );
        assert!(matches!(
            OutputTarget::from_name(Path::new("network.svg")),
            Err(PlotError::UnsupportedTarget(_))
        ));
        assert!(OutputTarget::from_name(Path::new("network")).is_err());
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(1.0), "1");
        assert_eq!(fmt_num(0.7), "0.7");
        assert_eq!(fmt_num(2.8685), "2.869");
        assert_eq!(fmt_num(-3.5), "-3.5");
        assert_eq!(fmt_num(-0.0001), "0");
    }

    #[test]
    fn test_markup_document_shell() {
        let m = model(vec![node("a", 1.0, 2.0)], vec![]);
        let tex = render_markup(&m);
        assert!(tex.starts_with("\\documentclass{standalone}\n\\usepackage{tikz-network}"));
        assert!(tex.contains("\\begin{tikzpicture}"));
        assert!(tex.contains("\\Vertex[x=1,y=2]{a}"));
        assert!(tex.ends_with("\\end{tikzpicture}\n\\end{document}\n"));
        assert!(!tex.contains("\\clip"));
    }

    #[test]
    fn test_markup_clip_with_canvas() {
        let mut m = model(vec![node("a", 0.0, 0.0)], vec![]);
        m.canvas = Some(CanvasSpec {
            width: 8.0,
            height: 6.0,
        });
        assert!(render_markup(&m).contains("\\clip (0,0) rectangle (8,6);"));
    }

    #[test]
    fn test_vertex_options_and_flags() {
        let mut n = node("d", 0.0, 0.0);
        n.size = Some(0.5);
        n.color = Some("red".to_string());
        n.opacity = Some(0.7);
        n.label = Some("Dennis".to_string());
        n.label_position = Some("below".to_string());
        n.pseudo = true;
        let line = vertex_line(&n);
        assert_eq!(
            line,
            "\\Vertex[x=0,y=0,size=0.5,color=red,opacity=0.7,label=Dennis,position=below,Pseudo]{d}"
        );
    }

    #[test]
    fn test_label_off_suppresses_label() {
        let mut n = node("e", 0.0, 0.0);
        n.label = Some("Esther".to_string());
        n.label_off = true;
        let line = vertex_line(&n);
        assert!(!line.contains("label=Esther"));
        assert!(line.contains("NoLabel"));
    }

    #[test]
    fn test_label_with_comma_is_braced() {
        let mut n = node("a", 0.0, 0.0);
        n.label = Some("x, y".to_string());
        assert!(vertex_line(&n).contains("label={x, y}"));
    }

    #[test]
    fn test_edge_directed_and_bend() {
        let mut e = edge("a", "b");
        e.directed = true;
        e.width = Some(1.5);
        let g = EdgeGeometry {
            bend: 8.531,
            loop_geometry: None,
            arrow: Some(ArrowGeometry::default()),
        };
        let m = model(vec![], vec![]);
        let line = edge_line(&e, &g, &m);
        assert_eq!(line, "\\Edge[lw=1.5,bend=8.531,Direct](a)(b)");
    }

    #[test]
    fn test_edge_loop_options_carry_unit() {
        let e = edge("f", "f");
        let g = EdgeGeometry {
            bend: 0.0,
            loop_geometry: Some(LoopGeometry {
                size: 15.0,
                position: 90.0,
                shape: 45.0,
            }),
            arrow: None,
        };
        let mut m = model(vec![], vec![]);
        m.unit = Unit::Mm;
        let line = edge_line(&e, &g, &m);
        assert!(line.contains("loopsize=15mm"));
        assert!(line.contains("loopposition=90"));
        assert!(line.contains("loopshape=45"));
    }

    #[test]
    fn test_arrow_tip_appended_to_style() {
        let mut e = edge("a", "b");
        e.directed = true;
        e.style = Some("dashed".to_string());
        let g = EdgeGeometry {
            bend: 0.0,
            loop_geometry: None,
            arrow: Some(ArrowGeometry {
                length: Some(0.2),
                width: Some(0.2),
            }),
        };
        let m = model(vec![], vec![]);
        let line = edge_line(&e, &g, &m);
        assert!(line.contains("style={dashed,-{Latex[length=0.2cm,width=0.2cm]}}"));
    }

    #[test]
    fn test_table_paths() {
        let (nodes, edges) = table_paths(Path::new("out/network.csv"));
        assert_eq!(nodes, Path::new("out/network_nodes.csv"));
        assert_eq!(edges, Path::new("out/network_edges.csv"));
    }

    #[test]
    fn test_write_tables_row_counts() {
        let dir = tempfile::tempdir().unwrap();
        let m = model(
            vec![node("a", 0.0, 0.0), node("b", 1.0, 1.0)],
            vec![edge("a", "b")],
        );
        let nodes_path = dir.path().join("net_nodes.csv");
        let edges_path = dir.path().join("net_edges.csv");
        write_tables(&m, &nodes_path, &edges_path).unwrap();

        let nodes = std::fs::read_to_string(&nodes_path).unwrap();
        let edges = std::fs::read_to_string(&edges_path).unwrap();
        // header + one row per element
        assert_eq!(nodes.lines().count(), 3);
        assert_eq!(edges.lines().count(), 2);
        assert!(nodes.lines().next().unwrap().starts_with("id,x,y,size"));
    }
}
