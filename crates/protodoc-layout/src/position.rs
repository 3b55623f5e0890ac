//! Coordinate assignment.
//!
//! The primary axis is a plain function of the rank. The secondary axis starts from a tight left
//! packing of every layer and is then refined by median alignment sweeps; each sweep moves a
//! layer towards the medians of its neighbours in the previous layer while keeping every pair of
//! adjacent nodes at least [`separation`] apart.

use crate::graphlib::Graph;
use crate::util::{build_layer_matrix, separation};
use crate::{EdgeLabel, GraphLabel, NodeLabel};

/// Positions every ranked and ordered node of `g`.
///
/// `rank_extent` is the largest node extent along the primary axis. Callers laying out several
/// components pass the value of the whole graph so that equal ranks line up.
pub fn position(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>, rank_extent: f64) {
    let layers = build_layer_matrix(g);
    if layers.is_empty() {
        return;
    }
    position_y(g, &layers, rank_extent);
    position_x(g, &layers);
}

fn position_y(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>, layers: &[Vec<String>], extent: f64) {
    let step = extent + g.graph().ranksep;
    for (rank, layer) in layers.iter().enumerate() {
        let y = rank as f64 * step + extent / 2.0;
        for v in layer {
            if let Some(n) = g.node_mut(v) {
                n.y = Some(y);
            }
        }
    }
}

fn position_x(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>, layers: &[Vec<String>]) {
    let seps: Vec<Vec<f64>> = layers
        .iter()
        .map(|layer| {
            layer
                .windows(2)
                .map(|pair| match (g.node(&pair[0]), g.node(&pair[1])) {
                    (Some(a), Some(b)) => separation(g.graph(), a, b),
                    _ => 0.0,
                })
                .collect()
        })
        .collect();

    for (layer, seps) in layers.iter().zip(&seps) {
        let Some(first) = layer.first() else {
            continue;
        };
        let mut x = g.node(first).map(|n| n.width / 2.0).unwrap_or(0.0);
        set_x(g, first, x);
        for (v, sep) in layer.iter().skip(1).zip(seps) {
            x += sep;
            set_x(g, v, x);
        }
    }

    let sweeps = g.graph().position_sweeps;
    let last = layers.len() - 1;
    for i in 0..sweeps {
        if i % 2 == 0 {
            for rank in 1..=last {
                align_layer(g, &layers[rank], &seps[rank], Neighbours::Above);
            }
        } else {
            for rank in (0..last).rev() {
                align_layer(g, &layers[rank], &seps[rank], Neighbours::Below);
            }
        }
    }

    let left = layers
        .iter()
        .flatten()
        .filter_map(|v| g.node(v).and_then(|n| Some(n.x? - n.width / 2.0)))
        .fold(f64::INFINITY, f64::min);
    if left.is_finite() && left != 0.0 {
        for v in layers.iter().flatten() {
            if let Some(n) = g.node_mut(v) {
                n.x = n.x.map(|x| x - left);
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Neighbours {
    Above,
    Below,
}

fn align_layer(
    g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>,
    layer: &[String],
    seps: &[f64],
    neighbours: Neighbours,
) {
    let desired: Vec<f64> = layer
        .iter()
        .map(|v| {
            let current = g.node(v).and_then(|n| n.x).unwrap_or(0.0);
            let adjacent = match neighbours {
                Neighbours::Above => g.predecessors(v),
                Neighbours::Below => g.successors(v),
            };
            let xs: Vec<f64> = adjacent
                .into_iter()
                .filter_map(|u| g.node(u).and_then(|n| n.x))
                .collect();
            median(xs).unwrap_or(current)
        })
        .collect();

    for (v, x) in layer.iter().zip(resolve_spacing(&desired, seps)) {
        set_x(g, v, x);
    }
}

/// Closest placement to `desired` that keeps neighbour `i` at least `seps[i - 1]` right of
/// neighbour `i - 1`.
///
/// A left-to-right pass pushes nodes right, a right-to-left pass pushes them left; both passes
/// satisfy every constraint, and so does their average.
pub fn resolve_spacing(desired: &[f64], seps: &[f64]) -> Vec<f64> {
    let n = desired.len();
    if n == 0 {
        return Vec::new();
    }
    let mut left = desired.to_vec();
    for i in 1..n {
        left[i] = desired[i].max(left[i - 1] + seps[i - 1]);
    }
    let mut right = desired.to_vec();
    for i in (0..n - 1).rev() {
        right[i] = desired[i].min(right[i + 1] - seps[i]);
    }
    left.iter().zip(&right).map(|(l, r)| (l + r) / 2.0).collect()
}

fn median(mut xs: Vec<f64>) -> Option<f64> {
    if xs.is_empty() {
        return None;
    }
    xs.sort_by(f64::total_cmp);
    let mid = xs.len() / 2;
    if xs.len() % 2 == 1 {
        Some(xs[mid])
    } else {
        Some((xs[mid - 1] + xs[mid]) / 2.0)
    }
}

fn set_x(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>, v: &str, x: f64) {
    if let Some(n) = g.node_mut(v) {
        n.x = Some(x);
    }
}
