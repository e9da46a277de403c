//! Hub/non-hub partition ordering
//!
//! A hub is a vertex whose indexed degree reaches the average degree
//! `|E| / |V|`. Hubs are numbered first so that a traversal touching them
//! finds them next to each other, and the remaining vertices follow.

use indexmap::IndexSet;

use crate::config::{Config, Direction};
use crate::error::Result;
use crate::graph::{AdjacencyIndex, EdgeList, VertexId};
use crate::order::OrderingStrategy;
use crate::permutation::{Permutation, PermutationBuilder};

/// Place hub vertices before all other vertices
#[derive(Debug, Clone, Default)]
pub struct HubPartition {
    pub direction: Direction,
    pub sort_hubs: bool,
    pub ascending: bool,
    pub maintain_zero: bool,
}

/// Vertices split by hub classification, both in a reproducible order
#[derive(Debug, Clone, Default)]
pub struct HubSplit {
    pub average: f64,
    pub hubs: IndexSet<VertexId>,
    pub non_hubs: IndexSet<VertexId>,
}

impl HubPartition {
    pub fn from_config(config: &Config) -> Self {
        Self {
            direction: config.direction,
            sort_hubs: config.sort_hubs,
            ascending: config.ascending,
            maintain_zero: config.maintain_zero,
        }
    }

    /// Classify every vertex of `graph`
    ///
    /// Each edge checks its source and its destination against the same
    /// index, so under out-degree indexing a pure sink can never be a hub.
    pub fn classify(graph: &EdgeList, index: &AdjacencyIndex) -> HubSplit {
        let average = graph.average_degree();
        let is_hub = |v: VertexId| index.degree(v).is_some_and(|d| d as f64 >= average);

        let mut hubs = IndexSet::new();
        for edge in &graph.edges {
            if is_hub(edge.src) {
                hubs.insert(edge.src);
            }
            if is_hub(edge.dst) {
                hubs.insert(edge.dst);
            }
        }

        let non_hubs = graph
            .vertices
            .iter()
            .copied()
            .filter(|v| !hubs.contains(v))
            .collect();

        HubSplit {
            average,
            hubs,
            non_hubs,
        }
    }

    /// Hubs in numbering order
    fn hub_order(&self, split: &HubSplit, index: &AdjacencyIndex) -> Vec<VertexId> {
        if self.sort_hubs {
            index
                .ranked(self.ascending)
                .into_iter()
                .map(|(v, _)| v)
                .filter(|v| split.hubs.contains(v))
                .collect()
        } else {
            split.hubs.iter().copied().collect()
        }
    }
}

impl OrderingStrategy for HubPartition {
    fn name(&self) -> &'static str {
        "hub"
    }

    fn compute(&self, graph: &EdgeList) -> Result<Permutation> {
        let index = AdjacencyIndex::build(graph, self.direction);
        let split = Self::classify(graph, &index);

        log::info!(
            "Found {} hubs and {} non-hubs (average {:?}-degree {:.3})",
            split.hubs.len(),
            split.non_hubs.len(),
            index.direction(),
            split.average
        );

        let reserve_zero = self.maintain_zero && graph.contains_vertex(0);
        let mut builder = PermutationBuilder::new(graph.vertex_count(), reserve_zero);
        for vertex in self.hub_order(&split, &index) {
            builder.assign(vertex);
        }
        for &vertex in &split.non_hubs {
            builder.assign(vertex);
        }

        let perm = builder.build();
        perm.check_covers(graph)?;
        Ok(perm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;

    fn graph(pairs: &[(u64, u64)]) -> EdgeList {
        pairs.iter().map(|&(s, d)| Edge::new(s, d)).collect()
    }

    #[test]
    fn star_center_is_the_only_hub() {
        let g = graph(&(1..=10).map(|i| (0, i)).collect::<Vec<_>>());
        let index = AdjacencyIndex::build(&g, Direction::Out);
        let split = HubPartition::classify(&g, &index);
        assert!((split.average - 10.0 / 11.0).abs() < 1e-12);
        assert_eq!(split.hubs.iter().copied().collect::<Vec<_>>(), vec![0]);
        assert_eq!(split.non_hubs.len(), 10);
    }

    #[test]
    fn star_leaves_become_hubs_under_indegree() {
        let g = graph(&(1..=10).map(|i| (0, i)).collect::<Vec<_>>());
        let index = AdjacencyIndex::build(&g, Direction::In);
        let split = HubPartition::classify(&g, &index);
        assert_eq!(split.hubs.len(), 10);
        assert!(!split.hubs.contains(&0));
    }

    #[test]
    fn unsorted_hubs_keep_classification_order() {
        // average = 6 / 5 = 1.2, vertices 3 and 1 have out-degree 2
        let g = graph(&[(4, 0), (3, 0), (1, 2), (3, 2), (1, 0), (2, 4)]);
        let perm = HubPartition::default().compute(&g).unwrap();
        assert_eq!(perm.get(3), Some(0));
        assert_eq!(perm.get(1), Some(1));
        assert_eq!(perm.get(4), Some(2));
        assert_eq!(perm.get(0), Some(3));
        assert_eq!(perm.get(2), Some(4));
    }

    #[test]
    fn sorted_hubs_follow_degree_then_index_order() {
        // average = 7 / 4 = 1.75, hubs are 2 (degree 2) and 1 (degree 3)
        let g = graph(&[(2, 0), (1, 0), (1, 2), (2, 3), (1, 3), (0, 3), (3, 0)]);
        let partition = HubPartition {
            sort_hubs: true,
            ..Default::default()
        };
        let perm = partition.compute(&g).unwrap();
        assert_eq!(perm.get(1), Some(0));
        assert_eq!(perm.get(2), Some(1));

        let ascending = HubPartition {
            sort_hubs: true,
            ascending: true,
            ..Default::default()
        };
        let perm = ascending.compute(&g).unwrap();
        assert_eq!(perm.get(2), Some(0));
        assert_eq!(perm.get(1), Some(1));
    }

    #[test]
    fn maintain_zero_pins_vertex_zero_among_non_hubs() {
        let g = graph(&(1..=4).map(|i| (i, 0)).chain([(1, 2)]).collect::<Vec<_>>());
        let partition = HubPartition {
            maintain_zero: true,
            ..Default::default()
        };
        let perm = partition.compute(&g).unwrap();
        assert_eq!(perm.get(0), Some(0));
        assert_eq!(perm.get(1), Some(1));
        assert!(perm.is_bijection());
    }
}
