//! Results persistence module
//!
//! Every artifact is first written to a temporary file next to its
//! destination. Nothing is renamed into place until all artifacts of a run
//! have been written, so an aborted run never leaves a partial set of
//! outputs behind.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde_json::{json, to_string_pretty};
use tempfile::NamedTempFile;

use crate::config::Config;
use crate::data::write_edge_list;
use crate::graph::EdgeList;
use crate::permutation::{write_order, Permutation};

/// Outputs written to temporary files, waiting to be moved into place
#[derive(Debug, Default)]
pub struct StagedOutputs {
    files: Vec<(NamedTempFile, PathBuf)>,
}

impl StagedOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Write the future content of `path` through `fill`
    pub fn stage<F>(&mut self, path: &Path, fill: F) -> Result<()>
    where
        F: FnOnce(&mut BufWriter<&mut NamedTempFile>) -> Result<()>,
    {
        if path.is_dir() {
            bail!("Output path {} is a directory", path.display());
        }
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)
            .with_context(|| format!("Could not create directory {}", parent.display()))?;

        let mut tmp = NamedTempFile::new_in(parent)
            .with_context(|| format!("Could not create temporary file in {}", parent.display()))?;
        {
            let mut writer = BufWriter::new(&mut tmp);
            fill(&mut writer)?;
            writer
                .flush()
                .with_context(|| format!("Could not write {}", path.display()))?;
        }
        self.files.push((tmp, path.to_path_buf()));
        Ok(())
    }

    /// Move every staged file into place, in staging order
    ///
    /// If a rename fails, files already moved by this call are removed again.
    pub fn commit(self) -> Result<()> {
        let mut committed: Vec<PathBuf> = Vec::with_capacity(self.files.len());
        for (tmp, path) in self.files {
            if let Err(e) = tmp.persist(&path) {
                for done in &committed {
                    if let Err(rm) = fs::remove_file(done) {
                        log::warn!("Could not remove {}: {}", done.display(), rm);
                    }
                }
                return Err(e.error)
                    .with_context(|| format!("Could not move output into {}", path.display()));
            }
            committed.push(path);
        }
        Ok(())
    }
}

/// Stage the reordered edge list
pub fn stage_edge_list(staged: &mut StagedOutputs, graph: &EdgeList, path: &Path) -> Result<()> {
    log::info!("Writing {} edges to {}", graph.edge_count(), path.display());
    staged.stage(path, |w| {
        write_edge_list(w, &graph.edges)
            .with_context(|| format!("Could not write edge list to {}", path.display()))
    })
}

/// Stage the permutation as an order file
pub fn stage_order(staged: &mut StagedOutputs, perm: &Permutation, path: &Path) -> Result<()> {
    log::info!("Writing permutation to {}", path.display());
    staged.stage(path, |w| {
        write_order(w, perm).with_context(|| format!("Could not write permutation to {}", path.display()))
    })
}

/// Summary of a finished run
#[derive(Debug, Clone)]
pub struct RunSummary<'a> {
    pub strategy: &'a str,
    pub config: &'a Config,
    pub input: &'a Path,
    pub output: &'a Path,
    pub vertex_count: usize,
    pub edge_count: usize,
    pub zero_displaced: Option<u64>,
    pub elapsed_secs: f64,
}

/// Stage run summary information
pub fn stage_summary(staged: &mut StagedOutputs, summary: &RunSummary<'_>, path: &Path) -> Result<()> {
    log::info!("Saving run summary to {}", path.display());

    let doc = json!({
        "strategy": summary.strategy,
        "config": summary.config,
        "input": summary.input.display().to_string(),
        "output": summary.output.display().to_string(),
        "graph_stats": {
            "vertex_count": summary.vertex_count,
            "edge_count": summary.edge_count,
            "avg_degree": if summary.vertex_count == 0 {
                0.0
            } else {
                summary.edge_count as f64 / summary.vertex_count as f64
            },
        },
        "zero_displaced": summary.zero_displaced,
        "elapsed_secs": summary.elapsed_secs,
    });

    staged.stage(path, |w| {
        w.write_all(to_string_pretty(&doc)?.as_bytes())?;
        Ok(())
    })
}
