//! Small helpers shared by the layout phases.

use crate::graphlib::Graph;
use crate::{EdgeLabel, GraphLabel, NodeLabel, Point};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Rectangle centered on `(cx, cy)`.
    pub fn from_center(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        Self {
            x: cx - width / 2.0,
            y: cy - height / 2.0,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        const EPS: f64 = 1e-6;
        self.x < other.right() - EPS
            && other.x < self.right() - EPS
            && self.y < other.bottom() - EPS
            && other.y < self.bottom() - EPS
    }
}

/// Where the segment from the center of `rect` towards `point` crosses the rectangle border.
///
/// A `point` on the center yields the middle of the right border.
pub fn intersect_rect(rect: &Rect, point: Point) -> Point {
    let Point { x, y } = rect.center();
    let dx = point.x - x;
    let dy = point.y - y;
    let mut w = rect.width / 2.0;
    let mut h = rect.height / 2.0;

    if dx == 0.0 && dy == 0.0 {
        return Point { x: x + w, y };
    }

    let (sx, sy) = if dy.abs() * w > dx.abs() * h {
        if dy < 0.0 {
            h = -h;
        }
        (h * dx / dy, h)
    } else {
        if dx < 0.0 {
            w = -w;
        }
        (w, w * dy / dx)
    };

    Point {
        x: x + sx,
        y: y + sy,
    }
}

/// Node ids grouped by rank and sorted by `order`. Nodes without a rank are skipped.
pub fn build_layer_matrix<E, G>(g: &Graph<NodeLabel, E, G>) -> Vec<Vec<String>>
where
    E: Default,
    G: Default,
{
    let mut max_rank: i32 = -1;
    let mut entries: Vec<(i32, usize, String)> = Vec::new();
    for id in g.nodes() {
        let Some(node) = g.node(id) else {
            continue;
        };
        let Some(rank) = node.rank else {
            continue;
        };
        max_rank = max_rank.max(rank);
        entries.push((rank.max(0), node.order.unwrap_or(usize::MAX), id.to_string()));
    }
    if max_rank < 0 {
        return Vec::new();
    }

    let mut layers: Vec<Vec<(usize, String)>> = vec![Vec::new(); (max_rank + 1) as usize];
    for (rank, order, id) in entries {
        layers[rank as usize].push((order, id));
    }
    layers
        .into_iter()
        .map(|mut layer| {
            layer.sort_by_key(|(order, _)| *order);
            layer.into_iter().map(|(_, id)| id).collect()
        })
        .collect()
}

/// Replaces missing, non-finite or too small sizes with `min_node_size`, and negative or
/// non-finite gaps with 0.
pub fn sanitize_sizes(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    {
        let label = g.graph_mut();
        for gap in [&mut label.nodesep, &mut label.ranksep, &mut label.edgesep] {
            if !gap.is_finite() || *gap < 0.0 {
                *gap = 0.0;
            }
        }
    }
    let min = {
        let m = g.graph().min_node_size;
        if m.is_finite() && m > 0.0 { m } else { 1.0 }
    };
    let mut fixed = 0usize;
    g.for_each_node_mut(|_id, n| {
        for side in [&mut n.width, &mut n.height] {
            if !side.is_finite() || *side < min {
                *side = min;
                fixed += 1;
            }
        }
    });
    if fixed > 0 {
        tracing::debug!(fixed, min, "replaced degenerate node sizes");
    }
}

/// Center-to-center distance required between two neighbours of one layer.
pub fn separation(graph: &GraphLabel, a: &NodeLabel, b: &NodeLabel) -> f64 {
    let gap = |n: &NodeLabel| if n.dummy { graph.edgesep } else { graph.nodesep };
    (a.width + b.width) / 2.0 + (gap(a) + gap(b)) / 2.0
}
