//! Break cycles by reversing a feedback arc set (FAS).
//!
//! Reversed edges are flagged on their label and restored by [`undo`], so callers always get
//! their edges back in the original direction.

use crate::graphlib::{EdgeKey, Graph};
use crate::{Acyclicer, EdgeLabel, GraphLabel, NodeLabel};
use rustc_hash::FxHashSet as HashSet;

pub fn run(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    let fas = match g.graph().acyclicer {
        Acyclicer::Greedy => crate::greedy_fas::greedy_fas_with_weight(g, |lbl: &EdgeLabel| {
            if !lbl.weight.is_finite() {
                return 0;
            }
            lbl.weight.round() as i64
        }),
        Acyclicer::Dfs => dfs_fas(g),
    };

    let mut reversed = 0usize;
    for e in fas.into_iter().filter(|e| !e.is_self_loop()) {
        let Some(mut label) = g.remove_edge_key(&e) else {
            continue;
        };
        label.forward_name = e.name.clone();
        label.reversed = true;

        let name = unique_rev_name(g, &e.w, &e.v);
        g.set_edge_named(e.w, e.v, Some(name), Some(label));
        reversed += 1;
    }
    if reversed > 0 {
        tracing::debug!(reversed, "reversed edges to break cycles");
    }
}

pub fn undo(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    for e in g.edge_keys() {
        if !g.edge_by_key(&e).is_some_and(|l| l.reversed) {
            continue;
        }
        let Some(mut label) = g.remove_edge_key(&e) else {
            continue;
        };
        let forward_name = label.forward_name.take();
        label.reversed = false;
        label.points.reverse();
        g.set_edge_named(e.w, e.v, forward_name, Some(label));
    }
}

fn unique_rev_name(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>, v: &str, w: &str) -> String {
    let mut i = 1usize;
    loop {
        let candidate = format!("rev{i}");
        if !g.has_edge(v, w, Some(&candidate)) {
            return candidate;
        }
        i += 1;
    }
}

/// Back edges of a depth-first search that starts from every unvisited node in insertion order.
///
/// Uses an explicit stack so the depth of the graph is not limited by the thread stack.
fn dfs_fas(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>) -> Vec<EdgeKey> {
    let mut fas: Vec<EdgeKey> = Vec::new();
    let mut visited: HashSet<String> = HashSet::default();
    let mut on_path: HashSet<String> = HashSet::default();
    let mut frames: Vec<(String, Vec<EdgeKey>, usize)> = Vec::new();

    for start in g.nodes() {
        if !visited.insert(start.to_string()) {
            continue;
        }
        on_path.insert(start.to_string());
        frames.push((start.to_string(), g.out_edges(start, None), 0));

        while let Some((v, out, next)) = frames.last_mut() {
            let Some(e) = out.get(*next).cloned() else {
                on_path.remove(v.as_str());
                frames.pop();
                continue;
            };
            *next += 1;
            if e.is_self_loop() {
                continue;
            }
            if on_path.contains(&e.w) {
                fas.push(e);
            } else if visited.insert(e.w.clone()) {
                on_path.insert(e.w.clone());
                let out = g.out_edges(&e.w, None);
                frames.push((e.w, out, 0));
            }
        }
    }
    fas
}
