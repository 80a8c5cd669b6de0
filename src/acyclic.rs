//! Acyclic sub-graph tracking and topological sorting.
//!
//! An [`AcyclicSubgraph`] tracks a rooted subset of a graph's edge-segments
//! through a membership bit vector over the segment id space. It owns no
//! graph entities, only the bit vector and a transient per-vertex
//! visitation map; both are derived from the parent graph's ids and become
//! stale when those ids are recreated.
use std::collections::{BTreeMap, VecDeque};

use bitvec::vec::BitVec;
use thiserror::Error;
use tracing::debug;

use crate::graph::{DirectedGraph, GraphError};
use crate::memory::EntityIndex;
use crate::{SegmentIndex, VertexIndex};

/// Failure of [`AcyclicSubgraph::topological_sort`].
///
/// Both conditions are expected, recoverable outcomes a caller may probe
/// for; neither yields a partial order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SortError {
    #[error("cycle detected through vertex {0:?}")]
    CycleDetected(VertexIndex),
    #[error("vertex {0:?} is unreachable from the root through tracked segments")]
    UnreachedVertex(VertexIndex),
}

/// Pre/post-visit counters of one vertex during a sort. Zero means the
/// event has not happened yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Visitation {
    pre: u32,
    post: u32,
}

/// A rooted subset of edge-segments expected to form a directed acyclic
/// sub-graph.
#[derive(Debug, Clone)]
pub struct AcyclicSubgraph {
    root: VertexIndex,
    members: BitVec,
    visitation: BTreeMap<VertexIndex, Visitation>,
}

impl AcyclicSubgraph {
    /// Create an empty sub-graph rooted at `root`, sized to the graph's
    /// current segment id space.
    pub fn new(graph: &DirectedGraph, root: VertexIndex) -> Self {
        let mut members = BitVec::new();
        members.resize(graph.segment_bound(), false);

        Self {
            root,
            members,
            visitation: BTreeMap::new(),
        }
    }

    /// The root vertex every tracked segment must be reachable from.
    pub fn root(&self) -> VertexIndex {
        self.root
    }

    /// Re-root the sub-graph. Membership is unaffected.
    pub fn set_root(&mut self, root: VertexIndex) {
        self.root = root;
    }

    /// Number of tracked segments.
    pub fn segment_count(&self) -> usize {
        self.members.count_ones()
    }

    /// Start tracking a segment, registering visitation entries for both
    /// of its endpoints.
    pub fn add_segment(
        &mut self,
        graph: &DirectedGraph,
        segment: SegmentIndex,
    ) -> Result<(), GraphError> {
        let upstream = graph
            .segment_upstream(segment)
            .ok_or(GraphError::UnknownSegment)?;
        let downstream = graph
            .segment_downstream(segment)
            .ok_or(GraphError::UnknownSegment)?;

        if segment.index() >= self.members.len() {
            self.members.resize(graph.segment_bound(), false);
        }
        self.members.set(segment.index(), true);

        self.visitation.entry(upstream).or_default();
        self.visitation.entry(downstream).or_default();

        Ok(())
    }

    /// Stop tracking a segment.
    ///
    /// An endpoint's visitation entry is discarded once no incident segment
    /// of that vertex remains tracked. That check scans the vertex's full
    /// incident segment list, trading O(degree) time per removal for not
    /// keeping per-vertex membership counts.
    pub fn remove_segment(
        &mut self,
        graph: &DirectedGraph,
        segment: SegmentIndex,
    ) -> Result<(), GraphError> {
        let upstream = graph
            .segment_upstream(segment)
            .ok_or(GraphError::UnknownSegment)?;
        let downstream = graph
            .segment_downstream(segment)
            .ok_or(GraphError::UnknownSegment)?;

        if segment.index() < self.members.len() {
            self.members.set(segment.index(), false);
        }

        for vertex in [upstream, downstream] {
            if !graph
                .vertex_segments(vertex)
                .any(|incident| self.contains_segment(incident))
            {
                self.visitation.remove(&vertex);
            }
        }

        Ok(())
    }

    /// Whether a segment is part of the sub-graph. O(1).
    pub fn contains_segment(&self, segment: SegmentIndex) -> bool {
        self.members
            .get(segment.index())
            .map(|bit| *bit)
            .unwrap_or(false)
    }

    /// Topologically sort the tracked sub-graph.
    ///
    /// Performs a depth-first traversal from the root along tracked
    /// outgoing segments, numbering pre- and post-visit events from one
    /// shared counter. Finished vertices are pushed to the front of the
    /// output, so the returned sequence is a valid topological order:
    /// every tracked segment points from an earlier to a later position.
    ///
    /// Fails with [`SortError::CycleDetected`] on reaching a vertex whose
    /// visit has started but not finished, and with
    /// [`SortError::UnreachedVertex`] when some endpoint of a tracked
    /// segment was never reached from the root. Visitation state is reset
    /// at the start of every call, so a sub-graph can be re-sorted after
    /// mutation.
    pub fn topological_sort(
        &mut self,
        graph: &DirectedGraph,
    ) -> Result<Vec<VertexIndex>, SortError> {
        for visitation in self.visitation.values_mut() {
            *visitation = Visitation::default();
        }

        if self.visitation.is_empty() {
            return Ok(Vec::new());
        }

        if !self.visitation.contains_key(&self.root) {
            // The root touches no tracked segment, so nothing is reachable.
            let (&vertex, _) = self.visitation.iter().next().expect("map is non-empty");
            debug!(?vertex, "sub-graph is not rooted");
            return Err(SortError::UnreachedVertex(vertex));
        }

        struct Frame {
            vertex: VertexIndex,
            targets: Vec<VertexIndex>,
            next: usize,
        }

        let targets = |subgraph: &Self, vertex: VertexIndex| -> Vec<VertexIndex> {
            graph
                .outgoing_segments(vertex)
                .filter(|segment| subgraph.contains_segment(*segment))
                .filter_map(|segment| graph.segment_downstream(segment))
                .collect()
        };

        let mut counter: u32 = 0;
        let mut order = VecDeque::with_capacity(self.visitation.len());
        let mut stack = Vec::new();

        counter += 1;
        if let Some(visitation) = self.visitation.get_mut(&self.root) {
            visitation.pre = counter;
        }
        stack.push(Frame {
            vertex: self.root,
            targets: targets(self, self.root),
            next: 0,
        });

        while let Some(frame) = stack.last_mut() {
            if frame.next < frame.targets.len() {
                let downstream = frame.targets[frame.next];
                frame.next += 1;

                let visitation = self
                    .visitation
                    .get(&downstream)
                    .copied()
                    .unwrap_or_default();

                if visitation.pre == 0 {
                    counter += 1;
                    if let Some(visitation) = self.visitation.get_mut(&downstream) {
                        visitation.pre = counter;
                    }
                    let downstream_targets = targets(self, downstream);
                    stack.push(Frame {
                        vertex: downstream,
                        targets: downstream_targets,
                        next: 0,
                    });
                } else if visitation.post == 0 {
                    // Started but unfinished: an ancestor on the active path.
                    debug!(vertex = ?downstream, "cycle detected during topological sort");
                    return Err(SortError::CycleDetected(downstream));
                }
            } else {
                let vertex = frame.vertex;
                stack.pop();

                counter += 1;
                if let Some(visitation) = self.visitation.get_mut(&vertex) {
                    visitation.post = counter;
                }
                order.push_front(vertex);
            }
        }

        for (&vertex, visitation) in &self.visitation {
            if visitation.pre == 0 {
                debug!(?vertex, "vertex unreached during topological sort");
                return Err(SortError::UnreachedVertex(vertex));
            }
        }

        Ok(order.into_iter().collect())
    }
}
