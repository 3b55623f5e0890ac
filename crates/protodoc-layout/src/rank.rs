//! Layer (rank) assignment.

use crate::graphlib::{EdgeKey, Graph, alg};
use crate::{EdgeLabel, GraphLabel, NodeLabel};

pub fn rank(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    longest_path(g);
}

/// Longest path from the sources: every source sits on rank 0 and every other node on the
/// smallest rank that keeps all of its incoming edges at least `minlen` long.
///
/// Expects an acyclic graph. Self-loops never constrain ranks.
pub fn longest_path(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    let order = match alg::topsort(g) {
        Some(order) => order,
        None => {
            debug_assert!(false, "longest_path requires an acyclic graph");
            g.node_ids()
        }
    };

    for v in order {
        let mut rank: i32 = 0;
        for e in g.in_edges(&v, None) {
            if e.is_self_loop() {
                continue;
            }
            let minlen = g.edge_by_key(&e).map(|l| l.minlen.max(1)).unwrap_or(1) as i32;
            let u_rank = g.node(&e.v).and_then(|n| n.rank).unwrap_or(0);
            rank = rank.max(u_rank + minlen);
        }
        if let Some(label) = g.node_mut(&v) {
            label.rank = Some(rank);
        }
    }
}

/// How much longer than `minlen` an edge is. Missing ranks count as `0`.
pub fn slack(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>, e: &EdgeKey) -> i32 {
    let w_rank = g.node(&e.w).and_then(|n| n.rank).unwrap_or(0);
    let v_rank = g.node(&e.v).and_then(|n| n.rank).unwrap_or(0);
    let minlen = g.edge_by_key(e).map(|lbl| lbl.minlen as i32).unwrap_or(1);
    w_rank - v_rank - minlen
}

pub fn max_rank(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>) -> Option<i32> {
    g.nodes().filter_map(|v| g.node(v).and_then(|n| n.rank)).max()
}
