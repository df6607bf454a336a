//! Parser for the plain-text edge-list graph format.
//!
//! ```text
//! # acquaintance network
//! digraph
//! a -> b
//! a -> c
//! f -> f
//! g
//! ```
//!
//! An optional `graph`/`digraph` header fixes directedness; without one the
//! graph is directed when any `->` edge appears. A bare identifier declares
//! an isolated node. Nodes enter the canonical order at first mention.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::space0,
    combinator::{eof, map},
    sequence::{delimited, tuple},
    IResult,
};

use crate::error::PlotError;
use crate::graph::Graph;

#[derive(Debug, PartialEq)]
enum Line {
    Header(bool),
    Edge { source: String, target: String, arrow: Arrow },
    Node(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Arrow {
    Directed,
    Undirected,
}

fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)
}

fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(space0, inner, space0)
}

fn parse_header(input: &str) -> IResult<&str, Line> {
    let (input, line) = alt((
        map(tuple((ws(tag("digraph")), eof)), |_| Line::Header(true)),
        map(tuple((ws(tag("graph")), eof)), |_| Line::Header(false)),
    ))(input)?;
    Ok((input, line))
}

fn parse_edge(input: &str) -> IResult<&str, Line> {
    let (input, (source, arrow, target, _)) = tuple((
        ws(identifier),
        alt((
            map(tag("->"), |_| Arrow::Directed),
            map(tag("--"), |_| Arrow::Undirected),
        )),
        ws(identifier),
        eof,
    ))(input)?;
    Ok((
        input,
        Line::Edge {
            source: source.to_string(),
            target: target.to_string(),
            arrow,
        },
    ))
}

fn parse_node(input: &str) -> IResult<&str, Line> {
    let (input, (id, _)) = tuple((ws(identifier), eof))(input)?;
    Ok((input, Line::Node(id.to_string())))
}

/// Parse a complete edge-list document into a graph.
pub fn parse_edgelist(input: &str) -> Result<Graph, PlotError> {
    let mut header: Option<bool> = None;
    let mut lines = Vec::new();
    let mut saw_directed_arrow = false;
    let mut first_content_line = true;

    for (number, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        // The header is only recognized before any node or edge; later on,
        // "graph" is just a node id.
        if first_content_line {
            if let Ok((_, Line::Header(directed))) = parse_header(line) {
                header = Some(directed);
                first_content_line = false;
                continue;
            }
        }
        first_content_line = false;

        let parsed = alt((parse_edge, parse_node))(line)
            .map(|(_, parsed)| parsed)
            .map_err(|_| {
                PlotError::MalformedGraph(format!("line {}: '{}'", number + 1, raw.trim()))
            })?;
        if let Line::Edge { arrow: Arrow::Directed, .. } = parsed {
            saw_directed_arrow = true;
        }
        lines.push(parsed);
    }

    let directed = header.unwrap_or(saw_directed_arrow);
    let mut graph = Graph::new(directed);
    for line in lines {
        match line {
            Line::Edge { source, target, .. } => {
                graph.add_node(source.clone());
                graph.add_node(target.clone());
                graph.add_edge(source, target);
            }
            Line::Node(id) => graph.add_node(id),
            Line::Header(_) => {}
        }
    }
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphView;

    #[test]
    fn test_parse_directed_graph() {
        let g = parse_edgelist("digraph\na -> b\nb -> c\n").unwrap();
        assert!(g.is_directed());
        assert_eq!(g.node_ids(), vec!["a", "b", "c"]);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn test_parse_undirected_graph() {
        let g = parse_edgelist("graph\na -- b\n").unwrap();
        assert!(!g.is_directed());
    }

    #[test]
    fn test_directedness_inferred_from_arrows() {
        assert!(parse_edgelist("a -> b\n").unwrap().is_directed());
        assert!(!parse_edgelist("a -- b\n").unwrap().is_directed());
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let g = parse_edgelist("# people\n\na -- b\n# more\nb -- c\n").unwrap();
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn test_isolated_node() {
        let g = parse_edgelist("a -- b\nlonely\n").unwrap();
        assert_eq!(g.node_ids(), vec!["a", "b", "lonely"]);
    }

    #[test]
    fn test_self_loop() {
        let g = parse_edgelist("f -> f\n").unwrap();
        assert!(g.edges()[0].is_loop());
    }

    #[test]
    fn test_first_mention_order() {
        let g = parse_edgelist("c -> a\na -> b\n").unwrap();
        assert_eq!(g.node_ids(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_graph_as_node_id_after_first_line() {
        let g = parse_edgelist("a -- b\ngraph\n").unwrap();
        assert_eq!(g.node_ids(), vec!["a", "b", "graph"]);
    }

    #[test]
    fn test_malformed_line() {
        let err = parse_edgelist("a -> \n").unwrap_err();
        match err {
            PlotError::MalformedGraph(msg) => assert!(msg.contains("line 1")),
            other => panic!("expected MalformedGraph, got {:?}", other),
        }
    }

    #[test]
    fn test_whitespace_tolerance() {
        let g = parse_edgelist("  a   ->   b  \n").unwrap();
        assert_eq!(g.edge_count(), 1);
    }
}
