//! Structural mutation of a [`DirectedGraph`].
//!
//! [`GraphModifier`] wraps a mutable borrow of a graph and exposes the
//! compound topology operations: breaking edges at a vertex, removing
//! vertices/edges/segments and whole vertex subsets, pruning dangling
//! sub-networks and recreating managed ids. Every operation checks its
//! preconditions before touching the graph and fires its
//! [`GraphEvent`](crate::GraphEvent) notifications only after the mutation
//! has fully taken effect.
use std::collections::{BTreeMap, BTreeSet, VecDeque};

use thiserror::Error;
use tracing::debug;

use crate::events::{EntityKind, EventRegistry, GraphEvent};
use crate::geometry::{EuclideanLength, LengthService};
use crate::graph::{DirectedGraph, EdgeMap, GraphError, SegmentMap, VertexMap};
use crate::memory::SecondaryMap;
use crate::{Direction, EdgeIndex, SegmentIndex, VertexIndex};

/// Error returned by [`GraphModifier::break_edge_at`] and
/// [`GraphModifier::break_edges_at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BreakError {
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("vertex is already an endpoint of the edge")]
    VertexOnEdge,
}

/// Structural mutation operations on top of a [`DirectedGraph`].
///
/// Holds a non-owning mutable borrow of the graph, the length-recomputation
/// service used while breaking edges, and the registry of structural-change
/// listeners.
#[derive(Debug)]
pub struct GraphModifier<'g, L = EuclideanLength> {
    graph: &'g mut DirectedGraph,
    length: L,
    events: EventRegistry,
}

impl<'g> GraphModifier<'g> {
    /// Create a modifier using planar Euclidean length recomputation.
    pub fn new(graph: &'g mut DirectedGraph) -> Self {
        Self::with_length_service(graph, EuclideanLength)
    }
}

impl<'g, L: LengthService> GraphModifier<'g, L> {
    /// Create a modifier with a custom length-recomputation service.
    pub fn with_length_service(graph: &'g mut DirectedGraph, length: L) -> Self {
        Self {
            graph,
            length,
            events: EventRegistry::new(),
        }
    }

    /// The underlying graph.
    pub fn graph(&self) -> &DirectedGraph {
        self.graph
    }

    /// The structural-change listener registry.
    pub fn events(&mut self) -> &mut EventRegistry {
        &mut self.events
    }

    /// Remove a vertex that has no incident edges.
    pub fn remove_vertex(&mut self, vertex: VertexIndex) -> Result<(), GraphError> {
        self.graph.remove_vertex(vertex)
    }

    /// Remove an edge, removing its segments first.
    ///
    /// One [`GraphEvent::SegmentRemoved`] fires per removed segment.
    pub fn remove_edge(&mut self, edge: EdgeIndex) -> Result<(), GraphError> {
        if !self.graph.has_edge(edge) {
            return Err(GraphError::UnknownEdge);
        }

        for direction in Direction::ALL {
            if let Some(segment) = self.graph.edge_segment(edge, direction) {
                self.remove_segment(segment)?;
            }
        }

        self.graph.remove_edge(edge);
        Ok(())
    }

    /// Remove a segment, detaching it from its parent edge.
    ///
    /// Fires [`GraphEvent::SegmentRemoved`].
    pub fn remove_segment(&mut self, segment: SegmentIndex) -> Result<(), GraphError> {
        self.graph
            .remove_segment(segment)
            .ok_or(GraphError::UnknownSegment)?;
        self.events.emit(GraphEvent::SegmentRemoved { segment });
        Ok(())
    }

    /// Remove a set of vertices together with everything incident to them.
    ///
    /// Removal is ordered segments → edges → vertices, since each later
    /// step requires its dependents to be gone already. Duplicate indices
    /// are removed once. Per-segment [`GraphEvent::SegmentRemoved`]
    /// notifications fire as usual.
    pub fn remove_subgraph(&mut self, vertices: &[VertexIndex]) -> Result<(), GraphError> {
        let vertices: BTreeSet<_> = vertices.iter().copied().collect();
        for &vertex in &vertices {
            if !self.graph.has_vertex(vertex) {
                return Err(GraphError::UnknownVertex);
            }
        }

        for &vertex in &vertices {
            let segments: Vec<_> = self.graph.vertex_segments(vertex).collect();
            for segment in segments {
                // An edge between two vertices of the set is visited twice.
                if self.graph.has_segment(segment) {
                    self.remove_segment(segment)?;
                }
            }
        }

        for &vertex in &vertices {
            let edges: Vec<_> = self.graph.vertex_edges(vertex).collect();
            for edge in edges {
                self.graph.remove_edge(edge);
            }
        }

        for &vertex in &vertices {
            self.graph.remove_vertex(vertex)?;
        }

        debug!(vertices = vertices.len(), "removed sub-graph");
        Ok(())
    }

    /// Break an edge in two at a vertex not currently on the edge.
    ///
    /// The original edge `(a, b)` is retained as `(a, vertex)`; the new
    /// edge `(vertex, b)` is returned. Per direction that carried a
    /// segment, the retained edge reuses the original segment (endpoints
    /// re-pointed, id kept) and the new edge receives an independent copy
    /// with a fresh id, so no two edges ever share a segment instance. A
    /// [`GraphEvent::SegmentAttached`] fires per newly materialized copy.
    /// Both edge lengths are recomputed through the length service.
    ///
    /// # Example
    ///
    /// ```
    /// # use routegraph::{DirectedGraph, Direction, GraphModifier};
    /// let mut graph = DirectedGraph::new();
    /// let a = graph.add_vertex([0.0, 0.0]);
    /// let b = graph.add_vertex([4.0, 0.0]);
    /// let e = graph.add_edge(a, b, 4.0).unwrap();
    /// graph.add_segment(e, Direction::Forward).unwrap();
    ///
    /// let v = graph.add_vertex([1.0, 0.0]);
    /// let mut modifier = GraphModifier::new(&mut graph);
    /// let new_edge = modifier.break_edge_at(v, e).unwrap();
    ///
    /// assert_eq!(graph.edge_vertices(e), Some([a, v]));
    /// assert_eq!(graph.edge_vertices(new_edge), Some([v, b]));
    /// assert_eq!(graph.edge_length(e), Some(1.0));
    /// assert_eq!(graph.edge_length(new_edge), Some(3.0));
    /// ```
    pub fn break_edge_at(
        &mut self,
        vertex: VertexIndex,
        edge: EdgeIndex,
    ) -> Result<EdgeIndex, BreakError> {
        let [a, b] = self
            .graph
            .edge_vertices(edge)
            .ok_or(GraphError::UnknownEdge)?;
        if vertex == a || vertex == b {
            return Err(BreakError::VertexOnEdge);
        }

        let pos_a = self
            .graph
            .vertex_position(a)
            .ok_or(GraphError::UnknownVertex)?;
        let pos_b = self
            .graph
            .vertex_position(b)
            .ok_or(GraphError::UnknownVertex)?;
        let pos_v = self
            .graph
            .vertex_position(vertex)
            .ok_or(GraphError::UnknownVertex)?;

        // Segment slots of the original edge, snapshotted before rewiring.
        let forward = self.graph.edge_segment(edge, Direction::Forward);
        let backward = self.graph.edge_segment(edge, Direction::Backward);

        self.graph.replace_edge_endpoint(edge, b, vertex);
        let new_edge = self.graph.add_edge(vertex, b, 0.0)?;

        self.graph
            .set_edge_length(edge, self.length.length(pos_a, pos_v));
        self.graph
            .set_edge_length(new_edge, self.length.length(pos_v, pos_b));

        let mut attached = Vec::new();

        if let Some(segment) = forward {
            // Retained edge reuses the original a → b segment as a → vertex.
            self.graph.set_segment_ends(segment, a, vertex);
            let copy = self.graph.add_segment(new_edge, Direction::Forward)?;
            attached.push(copy);
        }

        if let Some(segment) = backward {
            self.graph.set_segment_ends(segment, vertex, a);
            let copy = self.graph.add_segment(new_edge, Direction::Backward)?;
            attached.push(copy);
        }

        self.graph.debug_assert_edge_consistent(edge);
        self.graph.debug_assert_edge_consistent(new_edge);

        for segment in attached {
            self.events
                .emit(GraphEvent::SegmentAttached { vertex, segment });
        }

        debug!(?vertex, ?edge, ?new_edge, "broke edge");
        Ok(new_edge)
    }

    /// Break several edges at the same vertex.
    ///
    /// Returns a map from each original edge to its `(retained, new)` edge
    /// pair. All edges are validated before any of them is broken;
    /// duplicate indices are broken once.
    pub fn break_edges_at(
        &mut self,
        edges: &[EdgeIndex],
        vertex: VertexIndex,
    ) -> Result<BTreeMap<EdgeIndex, (EdgeIndex, EdgeIndex)>, BreakError> {
        let mut unique = BTreeSet::new();
        for &edge in edges {
            let [a, b] = self
                .graph
                .edge_vertices(edge)
                .ok_or(GraphError::UnknownEdge)?;
            if vertex == a || vertex == b {
                return Err(BreakError::VertexOnEdge);
            }
            unique.insert(edge);
        }

        let mut broken = BTreeMap::new();
        for edge in unique {
            let new_edge = self.break_edge_at(vertex, edge)?;
            broken.insert(edge, (edge, new_edge));
        }

        Ok(broken)
    }

    /// Remove every connected component whose vertex count is below
    /// `below` or above `above`.
    ///
    /// Reachability is undirected, over vertices and edges. When
    /// `keep_largest` is set the single largest component survives even if
    /// its size falls outside the bounds; ties go to the component holding
    /// the lowest vertex id. Afterwards the managed ids are recreated, so
    /// the surviving entities occupy a contiguous id range again.
    ///
    /// Returns the number of removed components.
    pub fn remove_dangling_subnetworks(
        &mut self,
        below: usize,
        above: usize,
        keep_largest: bool,
    ) -> Result<usize, GraphError> {
        let components = self.connected_components();

        let mut largest: Option<usize> = None;
        for (index, component) in components.iter().enumerate() {
            if largest.map_or(true, |l| component.len() > components[l].len()) {
                largest = Some(index);
            }
        }

        let mut removed = 0;
        for (index, component) in components.iter().enumerate() {
            if keep_largest && largest == Some(index) {
                continue;
            }
            if component.len() < below || component.len() > above {
                self.remove_subgraph(component)?;
                removed += 1;
            }
        }

        self.recreate_managed_ids();

        debug!(
            components = components.len(),
            removed, "pruned dangling sub-networks"
        );
        Ok(removed)
    }

    /// Reassign contiguous ids to vertices, edges and segments, preserving
    /// iteration order.
    ///
    /// Returns the old → new index maps. One
    /// [`GraphEvent::IdsRecreated`] fires per collection in which at least
    /// one id actually changed; calling this twice without interleaved
    /// mutation renumbers nothing the second time.
    pub fn recreate_managed_ids(&mut self) -> (VertexMap, EdgeMap, SegmentMap) {
        let (vertex_map, edge_map, segment_map) = self.graph.compact();

        if vertex_map.iter().any(|(old, new)| old != new) {
            self.events.emit(GraphEvent::IdsRecreated {
                entity: EntityKind::Vertex,
            });
        }
        if edge_map.iter().any(|(old, new)| old != new) {
            self.events.emit(GraphEvent::IdsRecreated {
                entity: EntityKind::Edge,
            });
        }
        if segment_map.iter().any(|(old, new)| old != new) {
            self.events.emit(GraphEvent::IdsRecreated {
                entity: EntityKind::Segment,
            });
        }

        (vertex_map, edge_map, segment_map)
    }

    /// Connected components under undirected reachability.
    fn connected_components(&self) -> Vec<Vec<VertexIndex>> {
        let mut label: SecondaryMap<VertexIndex, Option<u32>> =
            SecondaryMap::with_capacity(self.graph.vertex_count());
        let mut components = Vec::new();

        for start in self.graph.vertex_indices() {
            if label[start].is_some() {
                continue;
            }

            let id = components.len() as u32;
            let mut component = Vec::new();
            let mut queue = VecDeque::from([start]);
            label[start] = Some(id);

            while let Some(vertex) = queue.pop_front() {
                component.push(vertex);

                for edge in self.graph.vertex_edges(vertex) {
                    let Some(endpoints) = self.graph.edge_vertices(edge) else {
                        continue;
                    };
                    for neighbour in endpoints {
                        if label[neighbour].is_none() {
                            label[neighbour] = Some(id);
                            queue.push_back(neighbour);
                        }
                    }
                }
            }

            components.push(component);
        }

        components
    }
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;
    use std::rc::Rc;

    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::events::EventKind;

    /// A chain of `n` vertices on the x axis, every edge carrying both
    /// segments.
    fn chain(n: usize) -> (DirectedGraph, Vec<VertexIndex>, Vec<EdgeIndex>) {
        let mut graph = DirectedGraph::new();
        let vertices: Vec<_> = (0..n).map(|i| graph.add_vertex([i as f64, 0.0])).collect();
        let edges: Vec<_> = vertices
            .windows(2)
            .map(|pair| {
                let edge = graph.add_edge(pair[0], pair[1], 1.0).unwrap();
                graph.add_segment(edge, Direction::Forward).unwrap();
                graph.add_segment(edge, Direction::Backward).unwrap();
                edge
            })
            .collect();
        (graph, vertices, edges)
    }

    fn total_length(graph: &DirectedGraph) -> f64 {
        graph
            .edge_indices()
            .map(|edge| graph.edge_length(edge).unwrap())
            .sum()
    }

    /// Every segment id must be held by exactly one edge slot.
    fn assert_no_aliasing(graph: &DirectedGraph) {
        let mut seen = std::collections::BTreeSet::new();
        for edge in graph.edge_indices() {
            for direction in Direction::ALL {
                if let Some(segment) = graph.edge_segment(edge, direction) {
                    assert!(seen.insert(segment), "segment {segment:?} aliased");
                    assert_eq!(graph.segment_edge(segment), Some(edge));
                }
            }
        }
        assert_eq!(seen.len(), graph.segment_count());
    }

    #[test]
    fn break_preserves_length_and_redistributes_segments() {
        let (mut graph, vertices, edges) = chain(2);
        let edge = edges[0];
        let forward = graph.edge_segment(edge, Direction::Forward).unwrap();
        let backward = graph.edge_segment(edge, Direction::Backward).unwrap();

        let v = graph.add_vertex([0.25, 0.0]);
        let mut modifier = GraphModifier::new(&mut graph);
        let new_edge = modifier.break_edge_at(v, edge).unwrap();

        assert!((total_length(&graph) - 1.0).abs() < 1e-12);
        assert_eq!(graph.edge_vertices(edge), Some([vertices[0], v]));
        assert_eq!(graph.edge_vertices(new_edge), Some([v, vertices[1]]));

        // The retained edge reuses both original segments, re-pointed.
        assert_eq!(graph.edge_segment(edge, Direction::Forward), Some(forward));
        assert_eq!(graph.edge_segment(edge, Direction::Backward), Some(backward));
        assert_eq!(graph.segment_downstream(forward), Some(v));
        assert_eq!(graph.segment_upstream(backward), Some(v));

        // The new edge carries fresh copies.
        let forward_copy = graph.edge_segment(new_edge, Direction::Forward).unwrap();
        let backward_copy = graph.edge_segment(new_edge, Direction::Backward).unwrap();
        assert_ne!(forward_copy, forward);
        assert_ne!(backward_copy, backward);
        assert_eq!(graph.segment_upstream(forward_copy), Some(v));
        assert_eq!(graph.segment_downstream(backward_copy), Some(v));

        assert_eq!(graph.segment_count(), 4);
        assert_no_aliasing(&graph);
    }

    #[test]
    fn break_at_endpoint_is_rejected_without_mutation() {
        let (mut graph, vertices, edges) = chain(2);
        let before = graph.clone();

        let mut modifier = GraphModifier::new(&mut graph);
        assert_eq!(
            modifier.break_edge_at(vertices[0], edges[0]),
            Err(BreakError::VertexOnEdge)
        );

        assert_eq!(graph, before);
    }

    #[test]
    fn break_fires_one_attach_event_per_new_segment() {
        let (mut graph, _, edges) = chain(2);
        let v = graph.add_vertex([0.5, 0.0]);

        let seen: Rc<RefCell<Vec<GraphEvent>>> = Rc::default();
        let log = seen.clone();

        let mut modifier = GraphModifier::new(&mut graph);
        modifier
            .events()
            .register([EventKind::SegmentAttached], move |event| {
                log.borrow_mut().push(*event);
            });
        let new_edge = modifier.break_edge_at(v, edges[0]).unwrap();

        let forward_copy = graph.edge_segment(new_edge, Direction::Forward).unwrap();
        let backward_copy = graph.edge_segment(new_edge, Direction::Backward).unwrap();
        assert_eq!(
            *seen.borrow(),
            vec![
                GraphEvent::SegmentAttached {
                    vertex: v,
                    segment: forward_copy
                },
                GraphEvent::SegmentAttached {
                    vertex: v,
                    segment: backward_copy
                },
            ]
        );
    }

    #[test]
    fn break_edges_at_batches_per_edge() {
        let (mut graph, _, edges) = chain(3);
        let v = graph.add_vertex([0.5, 1.0]);

        let mut modifier = GraphModifier::new(&mut graph);
        let broken = modifier.break_edges_at(&edges, v).unwrap();

        assert_eq!(broken.len(), 2);
        for (original, (retained, new_edge)) in &broken {
            assert_eq!(original, retained);
            assert_ne!(retained, new_edge);
            assert_eq!(graph.edge_vertices(*retained).unwrap()[1], v);
            assert_eq!(graph.edge_vertices(*new_edge).unwrap()[0], v);
        }
        assert_eq!(graph.edge_count(), 4);
        assert_no_aliasing(&graph);
    }

    #[test]
    fn break_edges_at_breaks_duplicate_edges_once() {
        let (mut graph, _, edges) = chain(2);
        let v = graph.add_vertex([0.5, 0.0]);

        let mut modifier = GraphModifier::new(&mut graph);
        let broken = modifier.break_edges_at(&[edges[0], edges[0]], v).unwrap();

        assert_eq!(broken.len(), 1);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.segment_count(), 4);
        assert_no_aliasing(&graph);
    }

    #[test]
    fn remove_edge_removes_segments_first() {
        let (mut graph, _, edges) = chain(2);

        let seen: Rc<RefCell<Vec<GraphEvent>>> = Rc::default();
        let log = seen.clone();

        let mut modifier = GraphModifier::new(&mut graph);
        modifier.events().register_all(move |event| {
            log.borrow_mut().push(*event);
        });
        modifier.remove_edge(edges[0]).unwrap();

        assert_eq!(seen.borrow().len(), 2);
        assert!(seen
            .borrow()
            .iter()
            .all(|event| event.kind() == EventKind::SegmentRemoved));
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.segment_count(), 0);
        assert_eq!(graph.vertex_count(), 2);
    }

    #[test]
    fn remove_subgraph_clears_segments_edges_then_vertices() {
        // Triangle a-b-c plus an outside vertex d connected to c.
        let mut graph = DirectedGraph::new();
        let a = graph.add_vertex([0.0, 0.0]);
        let b = graph.add_vertex([1.0, 0.0]);
        let c = graph.add_vertex([0.0, 1.0]);
        let d = graph.add_vertex([2.0, 2.0]);
        for (x, y) in [(a, b), (b, c), (c, a), (c, d)] {
            let edge = graph.add_edge(x, y, 1.0).unwrap();
            graph.add_segment(edge, Direction::Forward).unwrap();
        }

        let mut modifier = GraphModifier::new(&mut graph);
        modifier.remove_subgraph(&[a, b, c]).unwrap();

        assert_eq!(graph.vertex_count(), 1);
        assert!(graph.has_vertex(d));
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.segment_count(), 0);
    }

    #[test]
    fn remove_subgraph_tolerates_duplicate_vertices() {
        let (mut graph, vertices, _) = chain(2);

        let mut modifier = GraphModifier::new(&mut graph);
        modifier
            .remove_subgraph(&[vertices[0], vertices[1], vertices[0]])
            .unwrap();

        assert!(graph.is_empty());
        assert_eq!(graph.segment_count(), 0);
    }

    #[test]
    fn remove_subgraph_rejects_unknown_vertices_without_mutation() {
        let (mut graph, vertices, _) = chain(2);
        let ghost = graph.add_vertex([9.0, 9.0]);
        graph.remove_vertex(ghost).unwrap();
        let before = graph.clone();

        let mut modifier = GraphModifier::new(&mut graph);
        assert_eq!(
            modifier.remove_subgraph(&[vertices[0], ghost]),
            Err(GraphError::UnknownVertex)
        );

        assert_eq!(graph, before);
    }

    #[rstest]
    #[case(3, usize::MAX, false, 5)]
    #[case(6, usize::MAX, false, 0)]
    #[case(6, usize::MAX, true, 5)]
    #[case(0, 4, false, 2)]
    fn dangling_subnetworks_are_pruned_by_size(
        #[case] below: usize,
        #[case] above: usize,
        #[case] keep_largest: bool,
        #[case] surviving_vertices: usize,
    ) {
        // Two components: a 2-chain and a 5-chain.
        let mut graph = DirectedGraph::new();
        let small: Vec<_> = (0..2).map(|i| graph.add_vertex([i as f64, 1.0])).collect();
        graph.add_edge(small[0], small[1], 1.0).unwrap();
        let large: Vec<_> = (0..5).map(|i| graph.add_vertex([i as f64, 0.0])).collect();
        for pair in large.windows(2) {
            let edge = graph.add_edge(pair[0], pair[1], 1.0).unwrap();
            graph.add_segment(edge, Direction::Forward).unwrap();
        }

        let mut modifier = GraphModifier::new(&mut graph);
        modifier
            .remove_dangling_subnetworks(below, above, keep_largest)
            .unwrap();

        assert_eq!(graph.vertex_count(), surviving_vertices);

        // Surviving ids are contiguous after the triggered id recreation.
        let ids: Vec<_> = graph.vertex_indices().collect();
        assert!(ids
            .iter()
            .enumerate()
            .all(|(position, vertex)| crate::memory::EntityIndex::index(*vertex) == position));
    }

    #[test]
    fn recreate_managed_ids_is_idempotent() {
        let (mut graph, vertices, edges) = chain(4);
        {
            let mut modifier = GraphModifier::new(&mut graph);
            modifier.remove_edge(edges[1]).unwrap();
        }
        graph.remove_vertex(vertices[1]).ok();

        let events: Rc<RefCell<Vec<GraphEvent>>> = Rc::default();
        let log = events.clone();

        let mut modifier = GraphModifier::new(&mut graph);
        modifier
            .events()
            .register([EventKind::IdsRecreated], move |event| {
                log.borrow_mut().push(*event);
            });

        let first = modifier.recreate_managed_ids();
        let fired = events.borrow().len();
        assert!(fired > 0);

        let second = modifier.recreate_managed_ids();
        // No interleaved mutation: identical (identity) assignment, silent.
        assert!(second.0.iter().all(|(old, new)| old == new));
        assert!(second.1.iter().all(|(old, new)| old == new));
        assert!(second.2.iter().all(|(old, new)| old == new));
        assert_eq!(events.borrow().len(), fired);
        assert_eq!(second.0.len(), first.0.len());
    }

    proptest! {
        /// Arbitrary break sequences never alias a segment between two
        /// edges and never lose length (break vertices sit on the broken
        /// edge's straight line).
        #[test]
        fn breaks_preserve_length_and_ownership(
            picks in prop::collection::vec((0usize..32, 0.1f64..0.9), 1..16)
        ) {
            let (mut graph, _, _) = chain(5);
            let original_length = total_length(&graph);

            for (pick, t) in picks {
                let edges: Vec<_> = graph.edge_indices().collect();
                let edge = edges[pick % edges.len()];
                let [a, b] = graph.edge_vertices(edge).unwrap();
                let pos_a = graph.vertex_position(a).unwrap();
                let pos_b = graph.vertex_position(b).unwrap();
                let v = graph.add_vertex([
                    pos_a[0] + t * (pos_b[0] - pos_a[0]),
                    pos_a[1] + t * (pos_b[1] - pos_a[1]),
                ]);

                let mut modifier = GraphModifier::new(&mut graph);
                modifier.break_edge_at(v, edge).unwrap();
            }

            prop_assert!((total_length(&graph) - original_length).abs() < 1e-9);
            assert_no_aliasing(&graph);
        }
    }
}
