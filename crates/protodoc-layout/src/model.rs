//! Layout label types and geometry primitives.
//!
//! Labels are plain `Clone` data so a caller's graph can be copied into a private working graph
//! for every run.

use crate::graphlib::EdgeKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which axis layers are stacked along, and from which side they are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RankDir {
    #[default]
    TB,
    BT,
    LR,
    RL,
}

impl RankDir {
    pub fn as_str(self) -> &'static str {
        match self {
            RankDir::TB => "TB",
            RankDir::BT => "BT",
            RankDir::LR => "LR",
            RankDir::RL => "RL",
        }
    }

    /// True when layers are stacked horizontally.
    pub fn is_horizontal(self) -> bool {
        matches!(self, RankDir::LR | RankDir::RL)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown layout direction `{0}` (expected TB, BT, LR, RL or their long forms)")]
pub struct ParseRankDirError(pub String);

impl FromStr for RankDir {
    type Err = ParseRankDirError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tb" | "td" | "top-to-bottom" => Ok(RankDir::TB),
            "bt" | "bottom-to-top" => Ok(RankDir::BT),
            "lr" | "left-to-right" => Ok(RankDir::LR),
            "rl" | "right-to-left" => Ok(RankDir::RL),
            _ => Err(ParseRankDirError(s.to_string())),
        }
    }
}

impl TryFrom<String> for RankDir {
    type Error = ParseRankDirError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RankDir> for String {
    fn from(value: RankDir) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for RankDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Feedback arc set strategy used to break cycles before ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Acyclicer {
    /// Reverse back edges found by a depth-first search in insertion order.
    #[default]
    Dfs,
    /// Eades, Lin and Smyth's greedy heuristic, weighted by edge weight.
    Greedy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphLabel {
    pub rankdir: RankDir,
    /// Gap between neighbouring nodes of one layer (secondary axis).
    pub nodesep: f64,
    /// Gap between layers (primary axis).
    pub ranksep: f64,
    /// Gap next to the dummy nodes that carry long edges.
    pub edgesep: f64,
    pub acyclicer: Acyclicer,
    /// Upper bound on crossing-reduction sweeps.
    pub order_iterations: usize,
    /// Median alignment sweeps during coordinate assignment.
    pub position_sweeps: usize,
    /// Size given to nodes whose width or height is missing or degenerate.
    pub min_node_size: f64,
    /// First dummy node of every long-edge chain; maintained by `normalize`.
    pub dummy_chains: Vec<String>,
}

impl Default for GraphLabel {
    fn default() -> Self {
        Self {
            rankdir: RankDir::TB,
            nodesep: 50.0,
            ranksep: 50.0,
            edgesep: 20.0,
            acyclicer: Acyclicer::Dfs,
            order_iterations: 24,
            position_sweeps: 4,
            min_node_size: 1.0,
            dummy_chains: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeLabel {
    pub width: f64,
    pub height: f64,
    /// Anchor (rectangle center), filled in by [`crate::layout`].
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub rank: Option<i32>,
    pub order: Option<usize>,
    /// Set on the zero-size nodes that stand in for a long edge while it crosses a layer.
    pub dummy: bool,
    pub edge_obj: Option<EdgeKey>,
    pub edge_label: Option<EdgeLabel>,
}

impl NodeLabel {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLabel {
    pub minlen: usize,
    pub weight: f64,
    /// Set while the edge points against its original direction in the working graph.
    pub reversed: bool,
    pub forward_name: Option<String>,
    /// Bend points where the edge crosses intermediate layers, source to target.
    pub points: Vec<Point>,
}

impl Default for EdgeLabel {
    fn default() -> Self {
        Self {
            minlen: 1,
            weight: 1.0,
            reversed: false,
            forward_name: None,
            points: Vec::new(),
        }
    }
}
