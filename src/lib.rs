//! In-place topology mutation and acyclic sub-graph analysis for directed
//! transport networks.
//!
//! The crate is built around three components:
//!
//!  - [`DirectedGraph`]: vertices, undirected edges and directed
//!    edge-segments stored in flat arenas with densely packed integer ids.
//!    An edge connects exactly two vertices and carries at most one segment
//!    per [`Direction`].
//!  - [`GraphModifier`]: structural mutation on top of the base graph —
//!    breaking edges at a vertex, removing vertices/edges/segments and
//!    whole vertex subsets, pruning dangling sub-networks and renumbering
//!    ids — firing [`GraphEvent`] notifications as a side effect.
//!  - [`AcyclicSubgraph`]: tracks a rooted subset of edge-segments through
//!    a membership bit vector and topologically sorts it, detecting cycles
//!    and vertices unreachable from the root.
//!
//! All components are single-threaded; the modifier and analyzer hold
//! non-owning references to the graph and must not outlive it.

pub mod acyclic;
pub mod events;
pub mod geometry;
pub mod graph;
pub mod memory;
pub mod modifier;

pub use acyclic::{AcyclicSubgraph, SortError};
pub use events::{EntityKind, EventKind, EventRegistry, GraphEvent};
pub use geometry::{EuclideanLength, LengthService};
pub use graph::{DirectedGraph, GraphError};
pub use modifier::{BreakError, GraphModifier};

crate::make_entity! {
    /// Index of a vertex within a [`DirectedGraph`].
    pub struct VertexIndex(u32);
    /// Index of an edge within a [`DirectedGraph`].
    pub struct EdgeIndex(u32);
    /// Index of an edge-segment within a [`DirectedGraph`].
    pub struct SegmentIndex(u32);
}

/// Orientation of a directed edge-segment relative to its parent edge.
///
/// An edge connects a vertex pair `(a, b)`; the `Forward` segment travels
/// `a → b` and the `Backward` segment travels `b → a`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    #[default]
    Forward = 0,
    Backward = 1,
}

impl Direction {
    /// Both directions, in the order used to index per-edge arrays.
    pub const ALL: [Direction; 2] = [Direction::Forward, Direction::Backward];

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline(always)]
    pub fn reverse(self) -> Direction {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}
