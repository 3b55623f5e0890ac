//! Message reference graph of one file.
//!
//! One node per message, keyed by its fully-qualified name, and one edge per distinct
//! `(message, referenced message)` pair. Only references to messages of the same file count;
//! scalar, enum and foreign types never produce edges.

use protodoc_core::{DiagramConfig, Message};
use protodoc_layout::graphlib::{Graph, GraphOptions};
use protodoc_layout::{EdgeLabel, GraphLabel, NodeLabel};
use rustc_hash::FxHashSet as HashSet;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaNode {
    pub id: String,
    pub label: String,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SchemaEdge {
    pub source: String,
    pub target: String,
}

impl SchemaEdge {
    pub fn id(&self) -> String {
        format!("{}-{}", self.source, self.target)
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchemaGraph {
    pub nodes: Vec<SchemaNode>,
    pub edges: Vec<SchemaEdge>,
}

impl SchemaGraph {
    pub fn node(&self, id: &str) -> Option<&SchemaNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Layout input: nodes and edges in builder order, spacing and direction from `config`.
    pub fn to_layout_graph(&self, config: &DiagramConfig) -> Graph<NodeLabel, EdgeLabel, GraphLabel> {
        let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new(GraphOptions::default());
        g.set_graph(config.graph_label());
        for node in &self.nodes {
            g.set_node(node.id.clone(), NodeLabel::new(node.width, node.height));
        }
        for edge in &self.edges {
            g.set_edge(edge.source.clone(), edge.target.clone());
        }
        g
    }
}

/// Builds the reference graph of `messages`.
///
/// Messages with an empty `fullName` are skipped, and a repeated `fullName` keeps its first
/// occurrence. Never fails: unresolvable field types simply produce no edge.
pub fn build(messages: &[Message], config: &DiagramConfig) -> SchemaGraph {
    let mut ids: HashSet<&str> = HashSet::default();
    let mut kept: Vec<&Message> = Vec::with_capacity(messages.len());
    for message in messages {
        let id = message.full_name.as_str();
        if id.is_empty() {
            tracing::debug!(name = %message.name, "skipping message without a full name");
            continue;
        }
        if !ids.insert(id) {
            tracing::debug!(id, "skipping duplicate message");
            continue;
        }
        kept.push(message);
    }

    let nodes: Vec<SchemaNode> = kept
        .iter()
        .map(|m| {
            let label = m.display_name().to_string();
            let (width, height) = node_size(&label, config);
            SchemaNode {
                id: m.full_name.clone(),
                label,
                width,
                height,
            }
        })
        .collect();

    let mut seen: HashSet<(&str, &str)> = HashSet::default();
    let mut edges: Vec<SchemaEdge> = Vec::new();
    for message in &kept {
        for field in &message.fields {
            let target = field.full_type.trim().trim_start_matches('.');
            let Some(target) = ids.get(target).copied() else {
                continue;
            };
            if seen.insert((message.full_name.as_str(), target)) {
                edges.push(SchemaEdge {
                    source: message.full_name.clone(),
                    target: target.to_string(),
                });
            }
        }
    }

    tracing::debug!(nodes = nodes.len(), edges = edges.len(), "built reference graph");
    SchemaGraph { nodes, edges }
}

/// Node rectangle for `label`: the configured size, widened to fit the label when
/// `size_by_label` is set.
pub fn node_size(label: &str, config: &DiagramConfig) -> (f64, f64) {
    let width = if config.size_by_label {
        let text = UnicodeWidthStr::width(label) as f64 * config.char_width + config.label_padding;
        config.node_width.max(text)
    } else {
        config.node_width
    };
    (width, config.node_height)
}
