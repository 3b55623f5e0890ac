use crate::graphlib::Graph;
use crate::{EdgeLabel, GraphLabel, NodeLabel};
use rustc_hash::FxHashSet as HashSet;

/// Initial layering: a depth-first walk started from nodes sorted by `(rank, insertion order)`,
/// appending each node to its rank's layer on first visit.
pub fn init_order(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>) -> Vec<Vec<String>> {
    let Some(max_rank) = crate::rank::max_rank(g) else {
        return Vec::new();
    };
    let mut layers: Vec<Vec<String>> = vec![Vec::new(); (max_rank.max(0) + 1) as usize];

    // `sort_by_key` is stable, so equal ranks keep insertion order.
    let mut start: Vec<&str> = g.nodes().collect();
    start.sort_by_key(|v| g.node(v).and_then(|n| n.rank).unwrap_or(i32::MAX));

    // Preorder walk with an explicit stack; successors are pushed in reverse so the first one
    // is visited first.
    let mut visited: HashSet<&str> = HashSet::default();
    let mut stack: Vec<&str> = Vec::new();
    for root in start {
        stack.push(root);
        while let Some(v) = stack.pop() {
            if !visited.insert(v) {
                continue;
            }
            let Some(rank) = g.node(v).and_then(|n| n.rank) else {
                continue;
            };
            if let Some(layer) = layers.get_mut(rank.max(0) as usize) {
                layer.push(v.to_string());
            }
            stack.extend(g.successors(v).into_iter().rev());
        }
    }
    layers
}
