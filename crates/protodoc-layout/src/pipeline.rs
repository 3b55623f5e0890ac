//! Layout entry points.
//!
//! Weakly connected components are laid out independently in private working graphs and then
//! packed side by side along the secondary axis, in the insertion order of their first node.

use crate::graphlib::{Graph, GraphOptions, alg};
use crate::util::{Rect, build_layer_matrix, sanitize_sizes};
use crate::{
    EdgeLabel, GraphLabel, LayoutResult, NodeLabel, acyclic, coordinate_system, normalize, order,
    position, rank,
};

/// Lays out `g` in place.
///
/// Every node receives `x`, `y` (its rectangle center), `rank` and `order`. Every edge that is
/// not a self-loop receives the bend points of its connector, in source-to-target order.
pub fn layout(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    if g.node_count() == 0 {
        return;
    }
    tracing::debug!(
        nodes = g.node_count(),
        edges = g.edge_count(),
        rankdir = %g.graph().rankdir,
        "layout start"
    );

    sanitize_sizes(g);
    coordinate_system::adjust(g);

    let rank_extent = g
        .nodes()
        .filter_map(|v| g.node(v))
        .map(|n| n.height)
        .fold(0.0, f64::max);
    let nodesep = g.graph().nodesep;

    let components = alg::components(g);
    tracing::debug!(components = components.len(), "split into components");

    let mut offset: f64 = 0.0;
    for mut members in components {
        members.sort_by_key(|v| g.node_ix(v).unwrap_or(usize::MAX));
        let mut working = component_graph(g, &members);
        layout_component(&mut working, rank_extent);

        let mut right: f64 = 0.0;
        for v in &members {
            let Some(src) = working.node(v) else {
                continue;
            };
            right = right.max(src.x.unwrap_or(0.0) + src.width / 2.0);
            if let Some(dst) = g.node_mut(v) {
                dst.x = src.x.map(|x| x + offset);
                dst.y = src.y;
                dst.rank = src.rank;
            }
        }
        for e in working.edge_keys() {
            let Some(points) = working.edge_by_key(&e).map(|l| l.points.clone()) else {
                continue;
            };
            right = points.iter().map(|p| p.x).fold(right, f64::max);
            if let Some(dst) = g.edge_mut_by_key(&e) {
                dst.points = points
                    .into_iter()
                    .map(|mut p| {
                        p.x += offset;
                        p
                    })
                    .collect();
            }
        }
        offset += right + nodesep;
    }

    assign_global_order(g);
    debug_assert_layout(g);

    coordinate_system::undo(g);
    translate(g);
}

/// Pure variant of [`layout`]: lays out a copy of `g` and collects the node placements.
pub fn layout_result(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>) -> LayoutResult {
    let mut working = g.clone();
    layout(&mut working);
    LayoutResult::from_graph(&working)
}

/// Copies one component into a fresh multigraph, leaving out self-loops.
fn component_graph(
    g: &Graph<NodeLabel, EdgeLabel, GraphLabel>,
    members: &[String],
) -> Graph<NodeLabel, EdgeLabel, GraphLabel> {
    let mut working: Graph<NodeLabel, EdgeLabel, GraphLabel> =
        Graph::new(GraphOptions { multigraph: true });
    working.set_graph(GraphLabel {
        dummy_chains: Vec::new(),
        ..g.graph().clone()
    });
    for v in members {
        if let Some(label) = g.node(v) {
            working.set_node(v.clone(), NodeLabel::new(label.width, label.height));
        }
    }
    for v in members {
        for e in g.out_edges(v, None) {
            if e.is_self_loop() {
                continue;
            }
            let label = g.edge_by_key(&e).cloned().unwrap_or_default();
            working.set_edge_named(
                e.v,
                e.w,
                e.name,
                Some(EdgeLabel {
                    reversed: false,
                    forward_name: None,
                    points: Vec::new(),
                    ..label
                }),
            );
        }
    }
    working
}

fn layout_component(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>, rank_extent: f64) {
    acyclic::run(g);
    debug_assert!(
        alg::find_cycles(g).is_empty(),
        "working graph still has a cycle after cycle breaking"
    );
    rank::rank(g);
    debug_assert_ranked(g);
    normalize::run(g);
    order::order(
        g,
        order::OrderOptions {
            max_iterations: g.graph().order_iterations,
            ..Default::default()
        },
    );
    position::position(g, rank_extent);
    normalize::undo(g);
    acyclic::undo(g);
}

/// Renumbers `order` across components so that it follows the secondary axis.
fn assign_global_order(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    let mut layers = build_layer_matrix(g);
    for layer in &mut layers {
        layer.sort_by(|a, b| {
            let xa = g.node(a).and_then(|n| n.x).unwrap_or(0.0);
            let xb = g.node(b).and_then(|n| n.x).unwrap_or(0.0);
            xa.total_cmp(&xb)
        });
    }
    for layer in layers {
        for (i, v) in layer.iter().enumerate() {
            if let Some(n) = g.node_mut(v) {
                n.order = Some(i);
            }
        }
    }
}

/// Moves the drawing so that the smallest rectangle edge sits at 0 on both axes.
fn translate(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    for v in g.nodes() {
        let Some(n) = g.node(v) else {
            continue;
        };
        if let (Some(x), Some(y)) = (n.x, n.y) {
            min_x = min_x.min(x - n.width / 2.0);
            min_y = min_y.min(y - n.height / 2.0);
        }
    }
    if !min_x.is_finite() || !min_y.is_finite() {
        return;
    }

    g.for_each_node_mut(|_id, n| {
        n.x = n.x.map(|x| x - min_x);
        n.y = n.y.map(|y| y - min_y);
    });
    g.for_each_edge_mut(|_ek, e| {
        for p in &mut e.points {
            p.x -= min_x;
            p.y -= min_y;
        }
    });
}

/// Every edge of the acyclic working graph points to a higher rank, at least `minlen` away, and
/// every source sits on rank 0.
fn debug_assert_ranked(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    if !cfg!(debug_assertions) {
        return;
    }
    let rank_of = |v: &str| g.node(v).and_then(|n| n.rank);
    for e in g.edges() {
        let (Some(v), Some(w)) = (rank_of(&e.v), rank_of(&e.w)) else {
            debug_assert!(false, "edge {} -> {} has an unranked endpoint", e.v, e.w);
            continue;
        };
        debug_assert!(
            w > v && rank::slack(g, e) >= 0,
            "edge {} -> {} points from rank {v} to rank {w}",
            e.v,
            e.w
        );
    }
    for v in g.sources() {
        debug_assert_eq!(rank_of(v), Some(0), "source `{v}` is not on rank 0");
    }
}

/// Totality, no-overlap and edges that never stay within one rank, checked in top-to-bottom
/// coordinates.
fn debug_assert_layout(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    if !cfg!(debug_assertions) {
        return;
    }
    let mut rects: Vec<(&str, Rect)> = Vec::with_capacity(g.node_count());
    for v in g.nodes() {
        let n = g.node(v);
        let placed = n.and_then(|n| Some((n.x?, n.y?, n.rank?, n.order?)));
        debug_assert!(placed.is_some(), "node `{v}` was not placed");
        if let (Some(n), Some((x, y, _, _))) = (n, placed) {
            rects.push((v, Rect::from_center(x, y, n.width, n.height)));
        }
    }
    for (i, (a, ra)) in rects.iter().enumerate() {
        for (b, rb) in &rects[i + 1..] {
            debug_assert!(!ra.intersects(rb), "nodes `{a}` and `{b}` overlap");
        }
    }
    for e in g.edges() {
        if e.is_self_loop() {
            continue;
        }
        let (Some(v), Some(w)) = (g.node(&e.v), g.node(&e.w)) else {
            continue;
        };
        debug_assert!(v.rank != w.rank, "edge {} -> {} stays within one rank", e.v, e.w);
    }
}
