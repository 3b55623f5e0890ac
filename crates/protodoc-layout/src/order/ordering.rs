use super::{Relationship, SortEntry, barycenter, cross_count, init_order, sort};
use crate::graphlib::Graph;
use crate::{EdgeLabel, GraphLabel, NodeLabel};

#[derive(Debug, Clone, Copy)]
pub struct OrderOptions {
    /// Hard cap on sweeps.
    pub max_iterations: usize,
    /// Stop after this many sweeps without a better layering.
    pub patience: usize,
}

impl Default for OrderOptions {
    fn default() -> Self {
        Self {
            max_iterations: 24,
            patience: 4,
        }
    }
}

/// Assigns `order` to every ranked node, minimizing crossings between adjacent layers.
pub fn order(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>, opts: OrderOptions) {
    let layering = init_order(g);
    if layering.is_empty() {
        return;
    }
    assign_order(g, &layering);
    let max_rank = (layering.len() - 1) as i32;

    let mut best_cc = cross_count(g, &layering);
    let mut best_layering = layering;
    let mut since_best: usize = 0;
    let mut i: usize = 0;
    while since_best < opts.patience && i < opts.max_iterations && best_cc > 0.0 {
        let bias_right = i % 4 >= 2;
        if i % 2 == 0 {
            sweep(g, 1..=max_rank, Relationship::InEdges, bias_right);
        } else {
            sweep(g, (0..max_rank).rev(), Relationship::OutEdges, bias_right);
        }

        let current = crate::util::build_layer_matrix(g);
        let cc = cross_count(g, &current);
        if cc < best_cc {
            since_best = 0;
            best_cc = cc;
            best_layering = current;
        } else {
            since_best += 1;
        }
        i += 1;
    }

    tracing::debug!(sweeps = i, crossings = best_cc, "ordered layers");
    assign_order(g, &best_layering);
}

fn assign_order(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>, layering: &[Vec<String>]) {
    for layer in layering {
        for (i, v) in layer.iter().enumerate() {
            if let Some(node) = g.node_mut(v) {
                node.order = Some(i);
            }
        }
    }
}

fn sweep(
    g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>,
    ranks: impl Iterator<Item = i32>,
    relationship: Relationship,
    bias_right: bool,
) {
    let layers = crate::util::build_layer_matrix(g);
    for rank in ranks {
        let Some(layer) = layers.get(rank.max(0) as usize) else {
            continue;
        };
        let entries: Vec<SortEntry> = barycenter(g, layer, relationship)
            .into_iter()
            .enumerate()
            .map(|(i, e)| SortEntry {
                v: e.v,
                i,
                barycenter: e.barycenter,
            })
            .collect();
        for (i, v) in sort(&entries, bias_right).iter().enumerate() {
            if let Some(node) = g.node_mut(v) {
                node.order = Some(i);
            }
        }
    }
}
