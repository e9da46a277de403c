//! Error taxonomy for the reordering pipeline

use std::io;
use thiserror::Error;

use crate::graph::VertexId;

/// Fatal errors raised while reading, reordering or rewriting a graph
#[derive(Debug, Error)]
pub enum ReorderError {
    /// A line of the edge list could not be parsed
    #[error("malformed input at line {line}: {reason} ({content:?})")]
    MalformedInput {
        line: usize,
        content: String,
        reason: String,
    },

    /// The external reordering program failed or produced unusable output
    #[error("collaborator {program} failed: {reason}{}", format_diagnostics(.exit_code, .stderr))]
    CollaboratorFailure {
        program: String,
        reason: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    /// A permutation does not cover a vertex it is applied to
    #[error("broken invariant: {0}")]
    BrokenInvariant(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

fn format_diagnostics(exit_code: &Option<i32>, stderr: &str) -> String {
    let mut out = String::new();
    if let Some(code) = exit_code {
        out.push_str(&format!(" (exit code {})", code));
    }
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        out.push_str(&format!(": {}", stderr));
    }
    out
}

impl ReorderError {
    pub(crate) fn malformed(line: usize, content: &str, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            line,
            content: content.trim_end().to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn collaborator(program: &str, reason: impl Into<String>) -> Self {
        Self::CollaboratorFailure {
            program: program.to_string(),
            reason: reason.into(),
            exit_code: None,
            stderr: String::new(),
        }
    }

    pub(crate) fn unmapped(vertex: VertexId) -> Self {
        Self::BrokenInvariant(format!("vertex {} has no entry in the permutation", vertex))
    }
}

/// Result alias for library operations
pub type Result<T> = std::result::Result<T, ReorderError>;
