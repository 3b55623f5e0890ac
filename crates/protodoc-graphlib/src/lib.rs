//! Graph container APIs used by `protodoc-layout`.
//!
//! Nodes are keyed by string ids and edges by `(v, w, name)`. Both iterate in insertion order so
//! that every algorithm built on top of the container is deterministic for a given build order.

#![forbid(unsafe_code)]

mod graph;

pub use graph::{EdgeKey, Graph, GraphOptions, alg};
