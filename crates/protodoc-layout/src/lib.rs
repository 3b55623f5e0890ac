//! Layered (Sugiyama-style) layout for directed graphs.
//!
//! [`layout`] runs five phases over a [`graphlib::Graph`] whose nodes carry a rectangle size:
//! cycle breaking ([`acyclic`]), layer assignment ([`rank`]), long-edge splitting
//! ([`normalize`]), crossing reduction ([`order`]) and coordinate assignment ([`position`]).
//! Results are deterministic for a given insertion order of nodes and edges.

#![forbid(unsafe_code)]

pub use protodoc_graphlib as graphlib;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod model;
pub use model::{Acyclicer, EdgeLabel, GraphLabel, NodeLabel, ParseRankDirError, Point, RankDir};

pub mod acyclic;
pub mod coordinate_system;
pub mod greedy_fas;
pub mod normalize;
pub mod order;
pub mod position;
pub mod rank;
pub mod util;

mod pipeline;
pub use pipeline::{layout, layout_result};

mod result;
pub use result::{LayoutResult, NodePosition};
