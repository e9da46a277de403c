//! End-to-end reordering: load, order, fix zero, rewrite, save

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;

use crate::apply::apply_permutation;
use crate::config::Config;
use crate::data::load_edge_list;
use crate::error::Result;
use crate::graph::{EdgeList, VertexId};
use crate::order::OrderingStrategy;
use crate::permutation::{preserve_zero, Permutation};
use crate::storage::{self, RunSummary, StagedOutputs};

/// Outcome of reordering one edge list
#[derive(Debug, Clone)]
pub struct Reordered {
    /// Final permutation, after the zero policy if it ran
    pub permutation: Permutation,

    /// Relabeled edges in input order
    pub graph: EdgeList,

    /// Vertex that gave up image 0 to vertex 0, if any
    pub zero_displaced: Option<VertexId>,
}

/// Compute a permutation with `strategy` and apply it to `graph`
pub fn reorder(
    graph: &EdgeList,
    strategy: &dyn OrderingStrategy,
    maintain_zero: bool,
) -> Result<Reordered> {
    log::info!("Computing {} ordering", strategy.name());

    let perm = strategy.compute(graph)?;
    perm.check_covers(graph)?;
    perm.check_bijection()?;

    let mut zero_displaced = None;
    let perm = if maintain_zero {
        zero_displaced = perm.preimage(0).filter(|&v| v != 0 && graph.contains_vertex(0));
        preserve_zero(perm)?
    } else {
        perm
    };

    let relabeled = apply_permutation(graph, &perm)?;
    Ok(Reordered {
        permutation: perm,
        graph: relabeled,
        zero_displaced,
    })
}

/// Files involved in one run
#[derive(Debug, Clone)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Where to persist the permutation, if anywhere
    pub order_out: Option<PathBuf>,
    /// Where to write a JSON run summary, if anywhere
    pub summary: Option<PathBuf>,
    pub config: Config,
}

/// Run a job; outputs are only moved into place once all of them are written
pub fn run(job: &Job, strategy: &dyn OrderingStrategy) -> anyhow::Result<Reordered> {
    let start = Instant::now();

    let graph = load_edge_list(&job.input, job.config.weighted)
        .with_context(|| format!("Could not load edge list {}", job.input.display()))?;
    let reordered = reorder(&graph, strategy, job.config.maintain_zero)?;

    // main output is committed first; a failed rename rolls back the rest
    let mut staged = StagedOutputs::new();
    storage::stage_edge_list(&mut staged, &reordered.graph, &job.output)?;
    if let Some(path) = &job.order_out {
        storage::stage_order(&mut staged, &reordered.permutation, path)?;
    }
    if let Some(path) = &job.summary {
        let summary = RunSummary {
            strategy: strategy.name(),
            config: &job.config,
            input: &job.input,
            output: &job.output,
            vertex_count: graph.vertex_count(),
            edge_count: graph.edge_count(),
            zero_displaced: reordered.zero_displaced,
            elapsed_secs: start.elapsed().as_secs_f64(),
        };
        storage::stage_summary(&mut staged, &summary, path)?;
    }
    log::debug!("Committing {} output files", staged.len());
    staged.commit()?;

    log::info!(
        "Reordered {} vertices in {:.3}s",
        graph.vertex_count(),
        start.elapsed().as_secs_f64()
    );
    Ok(reordered)
}
