//! Edge list construction module

use indexmap::IndexSet;

use crate::graph::{Edge, EdgeList, VertexId};

/// Builder for incrementally constructing an EdgeList
#[derive(Debug, Default)]
pub struct EdgeListBuilder {
    /// Edges seen so far
    edges: Vec<Edge>,

    /// Distinct vertices in first-encounter order
    vertices: IndexSet<VertexId>,

    /// Whether any edge carried a weight
    weighted: bool,
}

impl EdgeListBuilder {
    /// Create a new builder with the given edge capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            edges: Vec::with_capacity(capacity),
            vertices: IndexSet::with_capacity(capacity),
            weighted: false,
        }
    }

    /// Add an unweighted edge
    pub fn add_edge(&mut self, src: VertexId, dst: VertexId) {
        self.push(Edge::new(src, dst));
    }

    /// Add an edge carrying an opaque weight token
    pub fn add_weighted_edge(&mut self, src: VertexId, dst: VertexId, weight: &str) {
        self.push(Edge::weighted(src, dst, weight));
    }

    pub fn push(&mut self, edge: Edge) {
        self.vertices.insert(edge.src);
        self.vertices.insert(edge.dst);
        self.weighted |= edge.weight.is_some();
        self.edges.push(edge);
    }

    /// Number of edges added so far
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Mark the list as weighted even if it ends up empty
    pub fn weighted(mut self, weighted: bool) -> Self {
        self.weighted |= weighted;
        self
    }

    /// Build the edge list
    pub fn build(self) -> EdgeList {
        EdgeList {
            edges: self.edges,
            vertices: self.vertices,
            weighted: self.weighted,
        }
    }
}
