//! Split long edges into chains of rank-adjacent edges.
//!
//! An edge spanning `k > 1` ranks is replaced by `k - 1` zero-size dummy nodes. Ordering and
//! positioning treat the dummies like real nodes; [`undo`] turns their final positions into
//! bend points on the restored edge.

use crate::graphlib::{EdgeKey, Graph};
use crate::{EdgeLabel, GraphLabel, NodeLabel, Point};

const DUMMY_PREFIX: &str = "_d";

fn add_dummy_node(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>, label: NodeLabel) -> String {
    let mut i = g.node_count();
    loop {
        let v = format!("{DUMMY_PREFIX}{i}");
        if !g.has_node(&v) {
            g.set_node(v.clone(), label);
            return v;
        }
        i += 1;
    }
}

pub fn run(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    g.graph_mut().dummy_chains.clear();
    for e in g.edge_keys() {
        normalize_edge(g, e);
    }
    if !g.graph().dummy_chains.is_empty() {
        tracing::debug!(
            chains = g.graph().dummy_chains.len(),
            "split long edges into dummy chains"
        );
    }
}

fn normalize_edge(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>, e: EdgeKey) {
    let v_rank = g.node(&e.v).and_then(|n| n.rank).unwrap_or(0);
    let w_rank = g.node(&e.w).and_then(|n| n.rank).unwrap_or(0);
    if w_rank <= v_rank + 1 {
        return;
    }
    let Some(mut edge_label) = g.remove_edge_key(&e) else {
        return;
    };
    edge_label.points.clear();

    let chain_edge = EdgeLabel {
        weight: edge_label.weight,
        ..Default::default()
    };

    let mut prev = e.v.clone();
    for r in (v_rank + 1)..w_rank {
        let dummy = add_dummy_node(
            g,
            NodeLabel {
                rank: Some(r),
                dummy: true,
                edge_label: Some(edge_label.clone()),
                edge_obj: Some(e.clone()),
                ..Default::default()
            },
        );
        if r == v_rank + 1 {
            g.graph_mut().dummy_chains.push(dummy.clone());
        }
        g.set_edge_named(prev, dummy.clone(), e.name.clone(), Some(chain_edge.clone()));
        prev = dummy;
    }
    g.set_edge_named(prev, e.w.clone(), e.name.clone(), Some(chain_edge));
}

/// Replaces every dummy chain with its original edge, carrying the dummy positions as bend
/// points.
///
/// Chains are walked before anything is removed so that neighbour lookups share one adjacency
/// cache; all dummies then go away in a single pass.
pub fn undo(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    let chains = std::mem::take(&mut g.graph_mut().dummy_chains);
    let mut restored: Vec<(EdgeKey, EdgeLabel)> = Vec::with_capacity(chains.len());
    for start in &chains {
        let Some(first) = g.node(start) else {
            continue;
        };
        let (Some(key), Some(mut label)) = (first.edge_obj.clone(), first.edge_label.clone())
        else {
            continue;
        };

        let mut points: Vec<Point> = Vec::new();
        let mut v: &str = start;
        while let Some(node) = g.node(v).filter(|n| n.dummy) {
            if let (Some(x), Some(y)) = (node.x, node.y) {
                points.push(Point { x, y });
            }
            let Some(next) = g.successors(v).first().copied() else {
                break;
            };
            v = next;
        }

        label.points = points;
        restored.push((key, label));
    }

    let removed = g.retain_nodes(|_, n| !n.dummy);
    for (key, label) in restored {
        g.set_edge_named(key.v, key.w, key.name, Some(label));
    }
    if removed > 0 {
        tracing::debug!(removed, "restored long edges from dummy chains");
    }
}
