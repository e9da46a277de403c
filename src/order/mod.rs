//! Vertex ordering strategies

pub mod degree;
pub mod external;
pub mod hub;

use crate::error::Result;
use crate::graph::EdgeList;
use crate::permutation::Permutation;

pub use degree::DegreeRanking;
pub use external::{Collaborator, CollaboratorPreset, ExternalDelegate, OrderSource};
pub use hub::{HubPartition, HubSplit};

/// Anything that can derive a permutation from an edge list
///
/// Local heuristics and external programs sit behind the same interface, so
/// the zero policy and the applier never need to know which one ran.
pub trait OrderingStrategy {
    /// Short name used in logs and run summaries
    fn name(&self) -> &'static str;

    /// Compute a permutation covering every vertex of `graph`
    fn compute(&self, graph: &EdgeList) -> Result<Permutation>;
}
