//! Direction-indexed adjacency lists used for degree computations

use indexmap::IndexMap;

use crate::config::Direction;
use crate::graph::{EdgeList, VertexId};

/// Mapping from a vertex to the opposite endpoints of its indexed edges
///
/// Keys iterate in the order they were first indexed. A vertex that never
/// owns an edge under the chosen direction is absent rather than present
/// with an empty list, so [`AdjacencyIndex::degree`] returns `None` for it.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyIndex {
    direction: Direction,
    lists: IndexMap<VertexId, Vec<VertexId>>,
}

impl AdjacencyIndex {
    /// Build the index in a single pass over the edges
    pub fn build(graph: &EdgeList, direction: Direction) -> Self {
        let mut lists: IndexMap<VertexId, Vec<VertexId>> = IndexMap::new();

        for edge in &graph.edges {
            let (key, other) = match direction {
                Direction::Out => (edge.src, edge.dst),
                Direction::In => (edge.dst, edge.src),
            };
            lists.entry(key).or_default().push(other);
        }

        log::debug!(
            "Indexed {} of {} vertices by {:?} direction",
            lists.len(),
            graph.vertex_count(),
            direction
        );

        Self { direction, lists }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Degree of an indexed vertex, `None` if the vertex is not a key
    pub fn degree(&self, vertex: VertexId) -> Option<usize> {
        self.lists.get(&vertex).map(Vec::len)
    }

    /// Indexed vertices with their degree, in insertion order
    pub fn degrees(&self) -> impl Iterator<Item = (VertexId, usize)> + '_ {
        self.lists.iter().map(|(&v, list)| (v, list.len()))
    }

    /// Indexed vertices sorted by degree
    ///
    /// The sort is stable, so vertices with equal degree keep insertion order
    /// regardless of direction.
    pub fn ranked(&self, ascending: bool) -> Vec<(VertexId, usize)> {
        let mut ranked: Vec<(VertexId, usize)> = self.degrees().collect();
        if ascending {
            ranked.sort_by(|a, b| a.1.cmp(&b.1));
        } else {
            ranked.sort_by(|a, b| b.1.cmp(&a.1));
        }
        ranked
    }

    /// Number of indexed vertices
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}
