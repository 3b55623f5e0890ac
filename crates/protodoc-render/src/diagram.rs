//! Per-file reference diagrams: rectangles for messages, connectors for references.

use crate::graph_builder::{self, SchemaGraph};
use protodoc_core::{DiagramConfig, Documentation, File};
use protodoc_layout::util::{Rect, intersect_rect};
use protodoc_layout::{LayoutResult, Point, RankDir};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramNode {
    pub id: String,
    pub label: String,
    /// Top-left corner of the rectangle.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rank: i32,
    pub order: usize,
}

impl DiagramNode {
    pub fn rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    pub fn center(&self) -> Point {
        self.rect().center()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    /// Bend points between the two nodes, source to target. Empty for adjacent layers.
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DiagramBounds {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileDiagram {
    pub file: String,
    pub direction: RankDir,
    pub nodes: Vec<DiagramNode>,
    pub edges: Vec<DiagramEdge>,
    pub bounds: DiagramBounds,
}

impl FileDiagram {
    pub fn node(&self, id: &str) -> Option<&DiagramNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Full connector of `edge`: border of the source, bend points, border of the target.
    ///
    /// Returns an empty route for self-loops and for edges whose endpoints are unknown.
    pub fn edge_route(&self, edge: &DiagramEdge) -> Vec<Point> {
        if edge.source == edge.target {
            return Vec::new();
        }
        let (Some(source), Some(target)) = (self.node(&edge.source), self.node(&edge.target))
        else {
            return Vec::new();
        };

        let first = edge.points.first().copied().unwrap_or_else(|| target.center());
        let last = edge.points.last().copied().unwrap_or_else(|| source.center());

        let mut route = Vec::with_capacity(edge.points.len() + 2);
        route.push(intersect_rect(&source.rect(), first));
        route.extend(edge.points.iter().copied());
        route.push(intersect_rect(&target.rect(), last));
        route
    }
}

/// Lays out an already built reference graph.
pub fn layout_graph(file: &str, graph: &SchemaGraph, config: &DiagramConfig) -> FileDiagram {
    let mut g = graph.to_layout_graph(config);
    protodoc_layout::layout(&mut g);
    let result = LayoutResult::from_graph(&g);

    let nodes: Vec<DiagramNode> = graph
        .nodes
        .iter()
        .filter_map(|n| {
            let pos = result.get(&n.id)?;
            Some(DiagramNode {
                id: n.id.clone(),
                label: n.label.clone(),
                x: pos.left(),
                y: pos.top(),
                width: pos.width,
                height: pos.height,
                rank: pos.rank,
                order: pos.order,
            })
        })
        .collect();
    debug_assert_eq!(nodes.len(), graph.nodes.len(), "every message is placed");

    let edges: Vec<DiagramEdge> = graph
        .edges
        .iter()
        .map(|e| DiagramEdge {
            id: e.id(),
            source: e.source.clone(),
            target: e.target.clone(),
            points: g
                .edge(&e.source, &e.target, None)
                .map(|l| l.points.clone())
                .unwrap_or_default(),
        })
        .collect();

    let (width, height) = edges
        .iter()
        .flat_map(|e| &e.points)
        .fold(result.size(), |(w, h), p| (w.max(p.x), h.max(p.y)));
    FileDiagram {
        file: file.to_string(),
        direction: config.direction,
        nodes,
        edges,
        bounds: DiagramBounds { width, height },
    }
}

pub fn layout_file(file: &File, config: &DiagramConfig) -> FileDiagram {
    let graph = graph_builder::build(&file.messages, config);
    let diagram = layout_graph(&file.name, &graph, config);
    tracing::debug!(
        file = %file.name,
        nodes = diagram.nodes.len(),
        edges = diagram.edges.len(),
        "laid out file diagram"
    );
    diagram
}

/// One diagram per file, in descriptor order.
pub fn layout_documentation(doc: &Documentation, config: &DiagramConfig) -> Vec<FileDiagram> {
    doc.files.iter().map(|f| layout_file(f, config)).collect()
}
