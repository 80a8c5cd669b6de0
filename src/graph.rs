//! The base directed graph: vertices, undirected edges and directed
//! edge-segments in flat arenas keyed by densely packed ids.
//!
//! An edge connects exactly two distinct vertices and optionally carries up
//! to two directed segments, one per [`Direction`]. All references between
//! entities are plain indices into the arenas, so removing an entity can
//! never leave a dangling pointer, only an index that no longer resolves.
use std::collections::BTreeMap;

use thiserror::Error;

use crate::memory::Slab;
pub use crate::{Direction, EdgeIndex, SegmentIndex, VertexIndex};

/// A vertex: a 2-D position and the unordered list of incident edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    position: [f64; 2],
    edges: Vec<EdgeIndex>,
}

impl Vertex {
    fn relink(&mut self, edge_map: &EdgeMap) {
        for edge in &mut self.edges {
            *edge = edge_map[edge];
        }
    }
}

/// An undirected edge between two vertices.
///
/// The vertex pair is ordered `(a, b)`; the per-direction segment slots are
/// indexed by [`Direction`].
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    vertices: [VertexIndex; 2],
    segments: [Option<SegmentIndex>; 2],
    length: f64,
}

impl Edge {
    fn relink(&mut self, vertex_map: &VertexMap, segment_map: &SegmentMap) {
        for vertex in &mut self.vertices {
            *vertex = vertex_map[vertex];
        }
        for slot in &mut self.segments {
            *slot = slot.map(|segment| segment_map[&segment]);
        }
    }
}

/// A directed edge-segment: the traversable unit between two vertices.
///
/// The endpoint pair is ordered `[upstream, downstream]` and always matches
/// the parent edge's vertex pair in the segment's direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    edge: EdgeIndex,
    ends: [VertexIndex; 2],
}

impl Segment {
    /// The parent edge this segment belongs to.
    pub fn edge(&self) -> EdgeIndex {
        self.edge
    }

    /// The vertex this segment leads out of.
    pub fn upstream(&self) -> VertexIndex {
        self.ends[0]
    }

    /// The vertex this segment leads into.
    pub fn downstream(&self) -> VertexIndex {
        self.ends[1]
    }

    fn relink(&mut self, vertex_map: &VertexMap, edge_map: &EdgeMap) {
        self.edge = edge_map[&self.edge];
        for vertex in &mut self.ends {
            *vertex = vertex_map[vertex];
        }
    }
}

/// Map of updated vertex indices after id recreation.
pub type VertexMap = BTreeMap<VertexIndex, VertexIndex>;

/// Map of updated edge indices after id recreation.
pub type EdgeMap = BTreeMap<EdgeIndex, EdgeIndex>;

/// Map of updated segment indices after id recreation.
pub type SegmentMap = BTreeMap<SegmentIndex, SegmentIndex>;

/// Error returned by the structural operations on [`DirectedGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("unknown vertex")]
    UnknownVertex,
    #[error("unknown edge")]
    UnknownEdge,
    #[error("unknown edge-segment")]
    UnknownSegment,
    #[error("edge already carries a segment in this direction")]
    SegmentExists,
    #[error("edge endpoints must be distinct")]
    LoopEdge,
    #[error("vertex still has incident edges")]
    VertexNotIsolated,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectedGraph {
    vertices: Slab<VertexIndex, Vertex>,
    edges: Slab<EdgeIndex, Edge>,
    segments: Slab<SegmentIndex, Segment>,
}

impl DirectedGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Create a new empty graph with preallocated capacities.
    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            vertices: Slab::with_capacity(vertices),
            edges: Slab::with_capacity(edges),
            segments: Slab::with_capacity(edges * 2),
        }
    }

    /// Add a vertex at the given position.
    pub fn add_vertex(&mut self, position: [f64; 2]) -> VertexIndex {
        self.vertices.insert(Vertex {
            position,
            edges: Vec::new(),
        })
    }

    /// Add an edge between two distinct vertices.
    ///
    /// The edge starts out without segments; use [`DirectedGraph::add_segment`]
    /// to make it traversable.
    ///
    /// # Example
    ///
    /// ```
    /// # use routegraph::graph::DirectedGraph;
    /// let mut graph = DirectedGraph::new();
    ///
    /// let a = graph.add_vertex([0.0, 0.0]);
    /// let b = graph.add_vertex([3.0, 4.0]);
    /// let e = graph.add_edge(a, b, 5.0).unwrap();
    ///
    /// assert_eq!(graph.edge_vertices(e), Some([a, b]));
    /// assert!(graph.vertex_edges(a).eq([e]));
    /// ```
    pub fn add_edge(
        &mut self,
        a: VertexIndex,
        b: VertexIndex,
        length: f64,
    ) -> Result<EdgeIndex, GraphError> {
        if a == b {
            return Err(GraphError::LoopEdge);
        }
        if !self.vertices.contains(a) || !self.vertices.contains(b) {
            return Err(GraphError::UnknownVertex);
        }

        let edge = self.edges.insert(Edge {
            vertices: [a, b],
            segments: [None; 2],
            length,
        });

        self.vertices[a].edges.push(edge);
        self.vertices[b].edges.push(edge);

        Ok(edge)
    }

    /// Add a directed segment to an edge.
    ///
    /// The segment's endpoints are derived from the edge's vertex pair and
    /// the direction. At most one segment per direction may exist.
    ///
    /// # Example
    ///
    /// ```
    /// # use routegraph::graph::{DirectedGraph, Direction};
    /// let mut graph = DirectedGraph::new();
    ///
    /// let a = graph.add_vertex([0.0, 0.0]);
    /// let b = graph.add_vertex([1.0, 0.0]);
    /// let e = graph.add_edge(a, b, 1.0).unwrap();
    /// let s = graph.add_segment(e, Direction::Backward).unwrap();
    ///
    /// assert_eq!(graph.segment_upstream(s), Some(b));
    /// assert_eq!(graph.segment_downstream(s), Some(a));
    /// assert!(graph.add_segment(e, Direction::Backward).is_err());
    /// ```
    pub fn add_segment(
        &mut self,
        edge: EdgeIndex,
        direction: Direction,
    ) -> Result<SegmentIndex, GraphError> {
        let edge_data = self.edges.get(edge).ok_or(GraphError::UnknownEdge)?;

        if edge_data.segments[direction.index()].is_some() {
            return Err(GraphError::SegmentExists);
        }

        let ends = match direction {
            Direction::Forward => edge_data.vertices,
            Direction::Backward => [edge_data.vertices[1], edge_data.vertices[0]],
        };

        let segment = self.segments.insert(Segment { edge, ends });
        self.edges[edge].segments[direction.index()] = Some(segment);

        Ok(segment)
    }

    /// Remove a segment, detaching it from its parent edge.
    ///
    /// Returns the removed segment if it existed.
    pub fn remove_segment(&mut self, segment: SegmentIndex) -> Option<Segment> {
        let data = self.segments.remove(segment)?;

        let edge = &mut self.edges[data.edge];
        for slot in &mut edge.segments {
            if *slot == Some(segment) {
                *slot = None;
            }
        }

        Some(data)
    }

    /// Remove an edge, detaching it from its two vertices.
    ///
    /// Any segments still carried by the edge are removed along with it.
    /// Returns the removed edge if it existed.
    pub fn remove_edge(&mut self, edge: EdgeIndex) -> Option<Edge> {
        let data = self.edges.remove(edge)?;

        for segment in data.segments.into_iter().flatten() {
            self.segments.remove(segment);
        }
        for vertex in data.vertices {
            self.vertices[vertex].edges.retain(|e| *e != edge);
        }

        Some(data)
    }

    /// Remove a vertex.
    ///
    /// The vertex must have no incident edges; otherwise the graph is left
    /// unchanged and an error is returned.
    pub fn remove_vertex(&mut self, vertex: VertexIndex) -> Result<(), GraphError> {
        let data = self.vertices.get(vertex).ok_or(GraphError::UnknownVertex)?;

        if !data.edges.is_empty() {
            return Err(GraphError::VertexNotIsolated);
        }

        self.vertices.remove(vertex);
        Ok(())
    }

    /// The position of a vertex.
    pub fn vertex_position(&self, vertex: VertexIndex) -> Option<[f64; 2]> {
        Some(self.vertices.get(vertex)?.position)
    }

    /// The endpoint pair `(a, b)` of an edge.
    pub fn edge_vertices(&self, edge: EdgeIndex) -> Option<[VertexIndex; 2]> {
        Some(self.edges.get(edge)?.vertices)
    }

    /// The geometric length of an edge.
    pub fn edge_length(&self, edge: EdgeIndex) -> Option<f64> {
        Some(self.edges.get(edge)?.length)
    }

    /// The segment an edge carries in the given direction, if any.
    pub fn edge_segment(&self, edge: EdgeIndex, direction: Direction) -> Option<SegmentIndex> {
        self.edges.get(edge)?.segments[direction.index()]
    }

    /// The parent edge of a segment.
    pub fn segment_edge(&self, segment: SegmentIndex) -> Option<EdgeIndex> {
        Some(self.segments.get(segment)?.edge)
    }

    /// The vertex a segment leads out of.
    pub fn segment_upstream(&self, segment: SegmentIndex) -> Option<VertexIndex> {
        Some(self.segments.get(segment)?.ends[0])
    }

    /// The vertex a segment leads into.
    pub fn segment_downstream(&self, segment: SegmentIndex) -> Option<VertexIndex> {
        Some(self.segments.get(segment)?.ends[1])
    }

    /// Iterator over the edges incident to a vertex.
    pub fn vertex_edges(&self, vertex: VertexIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.vertices
            .get(vertex)
            .into_iter()
            .flat_map(|data| data.edges.iter().copied())
    }

    /// Iterator over all segments incident to a vertex, in either direction.
    pub fn vertex_segments(&self, vertex: VertexIndex) -> impl Iterator<Item = SegmentIndex> + '_ {
        self.vertex_edges(vertex)
            .flat_map(|edge| self.edges[edge].segments.into_iter().flatten())
    }

    /// Iterator over the segments leading out of a vertex.
    pub fn outgoing_segments(&self, vertex: VertexIndex) -> impl Iterator<Item = SegmentIndex> + '_ {
        self.vertex_segments(vertex)
            .filter(move |segment| self.segments[*segment].ends[0] == vertex)
    }

    /// Iterator over the segments leading into a vertex.
    pub fn incoming_segments(&self, vertex: VertexIndex) -> impl Iterator<Item = SegmentIndex> + '_ {
        self.vertex_segments(vertex)
            .filter(move |segment| self.segments[*segment].ends[1] == vertex)
    }

    /// Check whether the graph has a vertex with a given index.
    pub fn has_vertex(&self, vertex: VertexIndex) -> bool {
        self.vertices.contains(vertex)
    }

    /// Check whether the graph has an edge with a given index.
    pub fn has_edge(&self, edge: EdgeIndex) -> bool {
        self.edges.contains(edge)
    }

    /// Check whether the graph has a segment with a given index.
    pub fn has_segment(&self, segment: SegmentIndex) -> bool {
        self.segments.contains(segment)
    }

    /// Number of vertices in the graph.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges in the graph.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of segments in the graph.
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Exclusive upper bound on the segment ids handed out so far.
    ///
    /// Suitable for sizing id-indexed arrays or bit vectors; only id
    /// recreation lowers it again.
    #[inline]
    pub fn segment_bound(&self) -> usize {
        self.segments.upper_bound()
    }

    /// Whether the graph has no vertices, edges or segments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.edges.is_empty()
    }

    /// Iterator over the vertex indices of the graph.
    pub fn vertex_indices(&self) -> impl Iterator<Item = VertexIndex> + '_ {
        self.vertices.iter().map(|(vertex, _)| vertex)
    }

    /// Iterator over the edge indices of the graph.
    pub fn edge_indices(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.edges.iter().map(|(edge, _)| edge)
    }

    /// Iterator over the segment indices of the graph.
    pub fn segment_indices(&self) -> impl Iterator<Item = SegmentIndex> + '_ {
        self.segments.iter().map(|(segment, _)| segment)
    }

    /// Reindex vertices, edges and segments to be contiguous.
    ///
    /// Returns maps from the previous indices to the new indices for all
    /// three collections; every surviving entity appears in its map, even
    /// when its index did not change. Preserves iteration order.
    ///
    /// Any externally held id-indexed data is invalid until rebuilt from
    /// the returned maps.
    ///
    /// # Example
    ///
    /// ```
    /// # use routegraph::graph::DirectedGraph;
    /// let mut graph = DirectedGraph::new();
    ///
    /// let a = graph.add_vertex([0.0, 0.0]);
    /// let b = graph.add_vertex([1.0, 0.0]);
    /// let c = graph.add_vertex([2.0, 0.0]);
    /// let e = graph.add_edge(b, c, 1.0).unwrap();
    ///
    /// graph.remove_vertex(a).unwrap();
    /// let (vertex_map, _, _) = graph.compact();
    ///
    /// assert_eq!(vertex_map[&b], a);
    /// assert_eq!(graph.edge_vertices(e), Some([a, vertex_map[&c]]));
    /// ```
    pub fn compact(&mut self) -> (VertexMap, EdgeMap, SegmentMap) {
        let mut vertex_map = VertexMap::new();
        let mut edge_map = EdgeMap::new();
        let mut segment_map = SegmentMap::new();

        self.vertices.compact(|_, old, new| {
            vertex_map.insert(old, new);
        });
        self.edges.compact(|_, old, new| {
            edge_map.insert(old, new);
        });
        self.segments.compact(|_, old, new| {
            segment_map.insert(old, new);
        });

        for (_, vertex) in self.vertices.iter_mut() {
            vertex.relink(&edge_map);
        }
        for (_, edge) in self.edges.iter_mut() {
            edge.relink(&vertex_map, &segment_map);
        }
        for (_, segment) in self.segments.iter_mut() {
            segment.relink(&vertex_map, &edge_map);
        }

        (vertex_map, edge_map, segment_map)
    }

    /// Shrinks the graph's data store as much as possible.
    pub fn shrink_to_fit(&mut self) {
        self.vertices.shrink_to_fit();
        self.edges.shrink_to_fit();
        self.segments.shrink_to_fit();
    }

    /// Replaces one endpoint of an edge, updating the incidence lists.
    ///
    /// Segment endpoints are not touched; the caller re-points them.
    pub(crate) fn replace_edge_endpoint(
        &mut self,
        edge: EdgeIndex,
        old: VertexIndex,
        new: VertexIndex,
    ) {
        let data = &mut self.edges[edge];
        for vertex in &mut data.vertices {
            if *vertex == old {
                *vertex = new;
            }
        }

        self.vertices[old].edges.retain(|e| *e != edge);
        self.vertices[new].edges.push(edge);
    }

    /// Re-points a segment's endpoint pair after its parent edge changed.
    pub(crate) fn set_segment_ends(
        &mut self,
        segment: SegmentIndex,
        upstream: VertexIndex,
        downstream: VertexIndex,
    ) {
        self.segments[segment].ends = [upstream, downstream];
    }

    pub(crate) fn set_edge_length(&mut self, edge: EdgeIndex, length: f64) {
        self.edges[edge].length = length;
    }

    /// Checks the parent back-reference and endpoint agreement of every
    /// segment carried by `edge`. Debug builds only; a violation is a
    /// programming error, not bad input.
    pub(crate) fn debug_assert_edge_consistent(&self, edge: EdgeIndex) {
        if cfg!(debug_assertions) {
            let data = &self.edges[edge];
            for direction in Direction::ALL {
                if let Some(segment) = data.segments[direction.index()] {
                    let segment = &self.segments[segment];
                    debug_assert_eq!(segment.edge, edge);
                    let expected = match direction {
                        Direction::Forward => data.vertices,
                        Direction::Backward => [data.vertices[1], data.vertices[0]],
                    };
                    debug_assert_eq!(segment.ends, expected);
                }
            }
        }
    }
}
