//! Ordering by degree rank

use crate::config::{Config, Direction};
use crate::error::Result;
use crate::graph::{AdjacencyIndex, EdgeList};
use crate::order::OrderingStrategy;
use crate::permutation::{Permutation, PermutationBuilder};

/// Rank vertices by degree, then append degree-0 vertices in edge order
#[derive(Debug, Clone, Default)]
pub struct DegreeRanking {
    pub direction: Direction,
    pub ascending: bool,
    pub maintain_zero: bool,
}

impl DegreeRanking {
    pub fn from_config(config: &Config) -> Self {
        Self {
            direction: config.direction,
            ascending: config.ascending,
            maintain_zero: config.maintain_zero,
        }
    }

    /// First phase: ranked ids for every indexed vertex
    pub fn rank(&self, graph: &EdgeList, index: &AdjacencyIndex) -> PermutationBuilder {
        let reserve_zero = self.maintain_zero && graph.contains_vertex(0);
        let mut builder = PermutationBuilder::new(graph.vertex_count(), reserve_zero);
        for (vertex, _) in index.ranked(self.ascending) {
            builder.assign(vertex);
        }
        builder
    }

    /// Second phase: unindexed vertices in the order edges reveal them
    pub fn complete(&self, mut ranked: PermutationBuilder, graph: &EdgeList) -> Permutation {
        let before = ranked.len();
        for edge in &graph.edges {
            ranked.assign(edge.src);
            ranked.assign(edge.dst);
        }
        log::debug!(
            "Appended {} degree-0 vertices after {} ranked",
            ranked.len() - before,
            before
        );
        ranked.build()
    }
}

impl OrderingStrategy for DegreeRanking {
    fn name(&self) -> &'static str {
        "degree"
    }

    fn compute(&self, graph: &EdgeList) -> Result<Permutation> {
        let index = AdjacencyIndex::build(graph, self.direction);
        log::info!(
            "Ranking vertices by {} {:?}-degree",
            if self.ascending { "ascending" } else { "descending" },
            index.direction()
        );
        let ranked = self.rank(graph, &index);
        Ok(self.complete(ranked, graph))
    }
}
