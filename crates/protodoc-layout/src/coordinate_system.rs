//! Direction transforms.
//!
//! Every phase works top-to-bottom: ranks grow along `y` and the order within a rank along `x`.
//! Horizontal directions swap node extents before layout and swap the axes back afterwards;
//! bottom-to-top and right-to-left mirror the primary axis.

use crate::graphlib::Graph;
use crate::{EdgeLabel, GraphLabel, NodeLabel, Point, RankDir};

pub fn adjust(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    if g.graph().rankdir.is_horizontal() {
        swap_extents(g);
    }
}

pub fn undo(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    let rankdir = g.graph().rankdir;
    let mirror = matches!(rankdir, RankDir::BT | RankDir::RL);
    let swap = rankdir.is_horizontal();
    if !mirror && !swap {
        return;
    }

    map_points(g, |p| {
        let y = if mirror { -p.y } else { p.y };
        if swap {
            Point { x: y, y: p.x }
        } else {
            Point { x: p.x, y }
        }
    });
    if swap {
        swap_extents(g);
    }
}

fn swap_extents(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    g.for_each_node_mut(|_id, n| {
        std::mem::swap(&mut n.width, &mut n.height);
    });
}

/// Applies `f` to every placed node anchor and every edge bend point.
fn map_points(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>, f: impl Fn(Point) -> Point) {
    g.for_each_node_mut(|_id, n| {
        if let (Some(x), Some(y)) = (n.x, n.y) {
            let p = f(Point { x, y });
            n.x = Some(p.x);
            n.y = Some(p.y);
        }
    });
    g.for_each_edge_mut(|_ek, e| {
        for p in &mut e.points {
            *p = f(*p);
        }
    });
}
