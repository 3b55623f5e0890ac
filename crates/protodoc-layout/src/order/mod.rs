//! Node ordering / crossing minimization.
//!
//! Layers start from a depth-first order and are then refined by alternating barycenter sweeps,
//! keeping the layering with the fewest weighted crossings.

mod barycenter;
pub use barycenter::{BarycenterEntry, SortEntry, barycenter, sort};

mod init_order;
pub use init_order::init_order;

mod cross_count;
pub use cross_count::cross_count;

mod ordering;
pub use ordering::{OrderOptions, order};

/// Which neighbours a sweep reads orders from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    /// Predecessors on the layer above (downward sweep).
    InEdges,
    /// Successors on the layer below (upward sweep).
    OutEdges,
}
