//! Configuration management for the vertex reorderer

use serde::Serialize;

/// Which edge endpoint owns an adjacency entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Index by source, degree is the out-degree
    #[default]
    Out,
    /// Index by destination, degree is the in-degree
    In,
}

impl Direction {
    pub fn from_indegree(indegree: bool) -> Self {
        if indegree {
            Direction::In
        } else {
            Direction::Out
        }
    }
}

/// Options shared by every ordering strategy
#[derive(Debug, Clone, Default, Serialize)]
pub struct Config {
    /// Parse and emit a third (weight) column
    pub weighted: bool,

    /// Keep vertex 0 labeled 0 after reordering
    pub maintain_zero: bool,

    /// Rank by ascending degree instead of descending
    pub ascending: bool,

    /// Adjacency direction used for degree counts
    pub direction: Direction,

    /// Rank hubs by degree instead of classification order
    pub sort_hubs: bool,
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(
        weighted: bool,
        maintain_zero: bool,
        ascending: bool,
        direction: Direction,
        sort_hubs: bool,
    ) -> Self {
        Self {
            weighted,
            maintain_zero,
            ascending,
            direction,
            sort_hubs,
        }
    }
}
