//! Directed weighted graph with dense vertex and edge ids.

use crate::ids::{EdgeId, VertexId};

/// A directed edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge<W> {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: W,
}

/// Arena of edges plus per-vertex incidence lists.
///
/// The vertex count is fixed at construction; edges get sequential ids in
/// insertion order, and each incidence list preserves that order.
#[derive(Debug, Clone)]
pub struct DirectedWeightedGraph<W> {
    edges: Vec<Edge<W>>,
    incidence: Vec<Vec<EdgeId>>,
}

impl<W: Copy> DirectedWeightedGraph<W> {
    /// A graph with `vertex_count` vertices and no edges.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            edges: Vec::new(),
            incidence: vec![Vec::new(); vertex_count],
        }
    }

    /// Add a directed edge and return its id.
    ///
    /// # Panics
    ///
    /// Panics if either endpoint is not a vertex of this graph.
    pub fn add_edge(&mut self, edge: Edge<W>) -> EdgeId {
        assert!(
            edge.from.index() < self.incidence.len() && edge.to.index() < self.incidence.len(),
            "edge {} -> {} outside graph of {} vertices",
            edge.from,
            edge.to,
            self.incidence.len()
        );

        let id = EdgeId::from_index(self.edges.len());
        self.edges.push(edge);
        self.incidence[edge.from.index()].push(id);
        id
    }

    pub fn vertex_count(&self) -> usize {
        self.incidence.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// The edge with this id.
    ///
    /// # Panics
    ///
    /// Panics if the id did not come from this graph.
    pub fn edge(&self, id: EdgeId) -> &Edge<W> {
        &self.edges[id.index()]
    }

    /// Outgoing edges of a vertex, in insertion order. Empty for vertices
    /// outside the graph.
    pub fn incident_edges(&self, vertex: VertexId) -> &[EdgeId] {
        self.incidence
            .get(vertex.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains_vertex(&self, vertex: VertexId) -> bool {
        vertex.index() < self.incidence.len()
    }
}
