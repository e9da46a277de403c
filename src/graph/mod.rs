//! Graph representation module

pub mod adjacency;
pub mod builder;

use indexmap::IndexSet;

pub use adjacency::AdjacencyIndex;
pub use builder::EdgeListBuilder;

/// Identifier of a vertex as it appears in an edge list
pub type VertexId = u64;

/// A directed edge with an optional weight token
///
/// The weight is never interpreted, only copied through, so it is kept as
/// the exact text read from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub src: VertexId,
    pub dst: VertexId,
    pub weight: Option<Box<str>>,
}

impl Edge {
    pub fn new(src: VertexId, dst: VertexId) -> Self {
        Self { src, dst, weight: None }
    }

    pub fn weighted(src: VertexId, dst: VertexId, weight: &str) -> Self {
        Self {
            src,
            dst,
            weight: Some(weight.into()),
        }
    }
}

/// Edges in input order plus the distinct vertices they mention
#[derive(Debug, Clone, Default)]
pub struct EdgeList {
    /// Edges in file line order, duplicates preserved
    pub edges: Vec<Edge>,

    /// Distinct vertex ids in first-encounter order (source before destination)
    pub vertices: IndexSet<VertexId>,

    /// Whether edges carry a weight column
    pub weighted: bool,
}

impl EdgeList {
    /// Number of distinct vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges, counting duplicates
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.vertices.contains(&vertex)
    }

    /// Average degree `|E| / |V|`, zero for an empty graph
    pub fn average_degree(&self) -> f64 {
        if self.vertices.is_empty() {
            return 0.0;
        }
        self.edges.len() as f64 / self.vertices.len() as f64
    }

    /// Whether the observed ids are exactly `0..|V|`
    pub fn is_dense(&self) -> bool {
        let n = self.vertices.len() as VertexId;
        self.vertices.iter().all(|&v| v < n)
    }
}

impl FromIterator<Edge> for EdgeList {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        let mut builder = EdgeListBuilder::default();
        for edge in iter {
            builder.push(edge);
        }
        builder.build()
    }
}
