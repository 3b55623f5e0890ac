//! Diagram configuration.
//!
//! Loaded from YAML (JSON is valid YAML, so JSON config files work as well). Every key is
//! optional; missing keys keep the defaults below.

use protodoc_layout::{Acyclicer, GraphLabel, RankDir};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiagramConfig {
    pub direction: RankDir,
    /// Fixed node rectangle, in layout units.
    pub node_width: f64,
    pub node_height: f64,
    pub node_spacing: f64,
    pub rank_spacing: f64,
    pub edge_spacing: f64,
    pub acyclicer: Acyclicer,
    pub order_iterations: usize,
    /// Widen nodes whose label does not fit into `node_width`.
    pub size_by_label: bool,
    /// Width of one label column when `size_by_label` is set.
    pub char_width: f64,
    pub label_padding: f64,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            direction: RankDir::TB,
            node_width: 200.0,
            node_height: 20.0,
            node_spacing: 50.0,
            rank_spacing: 50.0,
            edge_spacing: 20.0,
            acyclicer: Acyclicer::Dfs,
            order_iterations: 24,
            size_by_label: false,
            char_width: 7.0,
            label_padding: 16.0,
        }
    }
}

impl DiagramConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded diagram config");
        Ok(config)
    }

    /// Layout parameters for one diagram.
    pub fn graph_label(&self) -> GraphLabel {
        GraphLabel {
            rankdir: self.direction,
            nodesep: self.node_spacing,
            ranksep: self.rank_spacing,
            edgesep: self.edge_spacing,
            acyclicer: self.acyclicer,
            order_iterations: self.order_iterations,
            ..Default::default()
        }
    }
}
