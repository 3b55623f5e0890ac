//! Owned snapshot of a finished layout.

use crate::graphlib::Graph;
use crate::{EdgeLabel, GraphLabel, NodeLabel, Point};
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodePosition {
    /// Anchor: the center of the node rectangle.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rank: i32,
    pub order: usize,
}

impl NodePosition {
    pub fn anchor(&self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }

    pub fn left(&self) -> f64 {
        self.x - self.width / 2.0
    }

    pub fn top(&self) -> f64 {
        self.y - self.height / 2.0
    }
}

/// Node id to placement, in the insertion order of the laid out graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutResult {
    pub nodes: IndexMap<String, NodePosition>,
}

impl LayoutResult {
    /// Collects the placements of a graph that went through [`crate::layout`].
    ///
    /// Nodes that were never placed are skipped.
    pub fn from_graph(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>) -> Self {
        let nodes = g
            .nodes()
            .filter_map(|v| {
                let n = g.node(v)?;
                let pos = NodePosition {
                    x: n.x?,
                    y: n.y?,
                    width: n.width,
                    height: n.height,
                    rank: n.rank.unwrap_or(0),
                    order: n.order.unwrap_or(0),
                };
                Some((v.to_string(), pos))
            })
            .collect();
        Self { nodes }
    }

    pub fn get(&self, id: &str) -> Option<&NodePosition> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NodePosition)> {
        self.nodes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Width and height of the box enclosing every node rectangle.
    pub fn size(&self) -> (f64, f64) {
        self.nodes.values().fold((0.0_f64, 0.0_f64), |(w, h), n| {
            (w.max(n.x + n.width / 2.0), h.max(n.y + n.height / 2.0))
        })
    }
}
