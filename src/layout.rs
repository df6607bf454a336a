//! Layout resolution: turn a layout option into one coordinate per node.
//!
//! User-supplied coordinates pass through verbatim when they cover every
//! node. Otherwise a named algorithm from a fixed set runs; every algorithm
//! is deterministic for a given (graph, seed) pair.

use std::collections::BTreeMap;
use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::PlotError;
use crate::graph::GraphView;
use crate::ir::Coordinate;
use crate::style::LayoutSpec;

const FR_ITERATIONS: usize = 50;
const FR_INITIAL_TEMPERATURE: f64 = 0.1;
const FR_COOLING: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutAlgorithm {
    FruchtermanReingold,
    Circular,
    Random,
    Grid,
}

impl LayoutAlgorithm {
    pub fn parse(name: &str) -> Result<Self, PlotError> {
        match name {
            "fr" | "fruchterman_reingold" => Ok(LayoutAlgorithm::FruchtermanReingold),
            "circle" | "circular" => Ok(LayoutAlgorithm::Circular),
            "random" => Ok(LayoutAlgorithm::Random),
            "grid" => Ok(LayoutAlgorithm::Grid),
            other => Err(PlotError::UnknownLayout(other.to_string())),
        }
    }

    /// Coordinates for every node, index-aligned with `graph.node_ids()`.
    pub fn coordinates<G: GraphView>(&self, graph: &G, seed: u64) -> Vec<Coordinate> {
        let ids = graph.node_ids();
        let index: BTreeMap<&str, usize> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();
        let edges: Vec<(usize, usize)> = graph
            .edges()
            .iter()
            .filter_map(|e| {
                let a = *index.get(e.source.as_str())?;
                let b = *index.get(e.target.as_str())?;
                Some((a, b))
            })
            .collect();

        match self {
            LayoutAlgorithm::FruchtermanReingold => fruchterman_reingold(ids.len(), &edges, seed),
            LayoutAlgorithm::Circular => circular(ids.len()),
            LayoutAlgorithm::Random => random(ids.len(), seed),
            LayoutAlgorithm::Grid => grid(ids.len()),
        }
    }
}

/// Resolve the layout option into coordinates, index-aligned with the
/// canonical node order.
pub fn resolve_layout<G: GraphView>(
    graph: &G,
    spec: Option<&LayoutSpec>,
    seed: u64,
) -> Result<Vec<Coordinate>, PlotError> {
    match spec {
        Some(LayoutSpec::Coordinates(map)) => {
            let mut coords = Vec::new();
            for (i, id) in graph.node_ids().iter().enumerate() {
                // Positions may be keyed by node id or by canonical index.
                let found = map.get(id).or_else(|| map.get(&i.to_string()));
                match found {
                    Some(&(x, y)) => coords.push(Coordinate::new(x, y)),
                    None => return Err(PlotError::IncompleteLayout(id.clone())),
                }
            }
            Ok(coords)
        }
        Some(LayoutSpec::Algorithm(name)) => {
            Ok(LayoutAlgorithm::parse(name)?.coordinates(graph, seed))
        }
        None => Ok(LayoutAlgorithm::FruchtermanReingold.coordinates(graph, seed)),
    }
}

fn fruchterman_reingold(n: usize, edges: &[(usize, usize)], seed: u64) -> Vec<Coordinate> {
    if n == 0 {
        return Vec::new();
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pos: Vec<(f64, f64)> = (0..n).map(|_| (rng.gen::<f64>(), rng.gen::<f64>())).collect();
    let k = (1.0 / n as f64).sqrt();
    let mut temperature = FR_INITIAL_TEMPERATURE;

    for _ in 0..FR_ITERATIONS {
        let mut disp = vec![(0.0f64, 0.0f64); n];

        // Repulsion between every pair
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = pos[i].0 - pos[j].0;
                let dy = pos[i].1 - pos[j].1;
                let dist = (dx * dx + dy * dy).sqrt().max(1e-9);
                let force = k * k / dist;
                disp[i].0 += dx / dist * force;
                disp[i].1 += dy / dist * force;
                disp[j].0 -= dx / dist * force;
                disp[j].1 -= dy / dist * force;
            }
        }

        // Attraction along edges; self-loops exert no force
        for &(a, b) in edges.iter().filter(|(a, b)| a != b) {
            let dx = pos[a].0 - pos[b].0;
            let dy = pos[a].1 - pos[b].1;
            let dist = (dx * dx + dy * dy).sqrt().max(1e-9);
            let force = dist * dist / k;
            disp[a].0 -= dx / dist * force;
            disp[a].1 -= dy / dist * force;
            disp[b].0 += dx / dist * force;
            disp[b].1 += dy / dist * force;
        }

        // Displace, capped by the current temperature
        for i in 0..n {
            let (dx, dy) = disp[i];
            let len = (dx * dx + dy * dy).sqrt().max(1e-9);
            let step = len.min(temperature);
            pos[i].0 += dx / len * step;
            pos[i].1 += dy / len * step;
        }
        temperature *= FR_COOLING;
    }

    pos.into_iter().map(|(x, y)| Coordinate::new(x, y)).collect()
}

fn circular(n: usize) -> Vec<Coordinate> {
    (0..n)
        .map(|i| {
            let angle = TAU * i as f64 / n.max(1) as f64;
            Coordinate::new(angle.cos(), angle.sin())
        })
        .collect()
}

fn random(n: usize, seed: u64) -> Vec<Coordinate> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Coordinate::new(rng.gen::<f64>(), rng.gen::<f64>()))
        .collect()
}

fn grid(n: usize) -> Vec<Coordinate> {
    let cols = (n as f64).sqrt().ceil().max(1.0) as usize;
    (0..n)
        .map(|i| Coordinate::new((i % cols) as f64, (i / cols) as f64))
        .collect()
}
