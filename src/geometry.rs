//! Render geometry derivation: self-loop shapes, bends that keep parallel
//! edges apart, and arrow dimensions for directed edges.

use std::collections::HashMap;

use crate::ir::{ArrowGeometry, EdgeGeometry, LoopGeometry, ResolvedEdge};
use crate::style::StyleDefaults;

/// Derive geometry for every edge, index-aligned with the input.
pub fn derive(edges: &[ResolvedEdge], defaults: &StyleDefaults) -> Vec<EdgeGeometry> {
    // Non-loop edges sharing an unordered endpoint pair must diverge, so
    // collect group membership first, in canonical order.
    let mut groups: HashMap<(String, String), Vec<usize>> = HashMap::new();
    for (i, edge) in edges.iter().enumerate() {
        if edge.is_loop() {
            continue;
        }
        groups.entry(pair_key(edge)).or_default().push(i);
    }

    edges
        .iter()
        .enumerate()
        .map(|(i, edge)| {
            if edge.is_loop() {
                return EdgeGeometry {
                    bend: 0.0,
                    loop_geometry: Some(LoopGeometry {
                        size: edge.loop_size.unwrap_or(defaults.loop_size),
                        position: edge.loop_position.unwrap_or(defaults.loop_position),
                        shape: edge.loop_shape.unwrap_or(defaults.loop_shape),
                    }),
                    arrow: arrow_for(edge),
                };
            }

            let group = &groups[&pair_key(edge)];
            let curvature = if group.len() == 1 {
                edge.curved
            } else {
                // k-th member of a parallel group: alternate sign, widen
                // every second step, so edges fan out symmetrically.
                let k = group.iter().position(|&idx| idx == i).unwrap_or(0);
                let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
                let level = (k / 2 + 1) as f64;
                let base = if edge.curved != 0.0 {
                    edge.curved.abs()
                } else {
                    defaults.parallel_curve
                };
                sign * level * base
            };

            EdgeGeometry {
                bend: bend_degrees(curvature),
                loop_geometry: None,
                arrow: arrow_for(edge),
            }
        })
        .collect()
}

fn pair_key(edge: &ResolvedEdge) -> (String, String) {
    if edge.source <= edge.target {
        (edge.source.clone(), edge.target.clone())
    } else {
        (edge.target.clone(), edge.source.clone())
    }
}

fn arrow_for(edge: &ResolvedEdge) -> Option<ArrowGeometry> {
    if edge.directed {
        Some(ArrowGeometry {
            length: edge.arrow_size,
            width: edge.arrow_width,
        })
    } else {
        None
    }
}

/// Map a curvature factor to a bend angle in degrees: sign-preserving,
/// monotone, bounded to (-90, 90).
fn bend_degrees(curvature: f64) -> f64 {
    (2.0 * curvature).atan().to_degrees()
}
