//! Ordering delegated to an external reordering program
//!
//! The edge list is written as a two-column file, the program is run with a
//! configurable argument list, and its permutation is read back either from
//! a well-known file or from its standard output.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use clap::ValueEnum;
use serde::Serialize;

use crate::data::write_pairs;
use crate::error::{ReorderError, Result};
use crate::graph::{EdgeList, VertexId};
use crate::order::OrderingStrategy;
use crate::permutation::{read_order, Permutation};

/// Placeholder replaced by the path of the two-column input file
pub const INPUT_PLACEHOLDER: &str = "{input}";

/// Placeholder replaced by the path the program writes its own edge list to
pub const OUTPUT_PLACEHOLDER: &str = "{output}";

/// Where the program leaves its permutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSource {
    /// A file, relative to the working directory
    File(PathBuf),
    /// The program's standard output
    Stdout,
}

impl Default for OrderSource {
    fn default() -> Self {
        OrderSource::File(PathBuf::from("new_order.el"))
    }
}

/// Invocation conventions of the known reordering programs
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CollaboratorPreset {
    /// Writes `new_order.el`, takes `input output`
    Ph,
    /// Writes `new_order.el`, takes block sizing hints before `input output`
    Br,
    /// Prints the permutation, takes only `input`
    Rabbit,
}

/// An external program and how to talk to it
#[derive(Debug, Clone, Serialize)]
pub struct Collaborator {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub order_source: OrderSource,
}

impl Collaborator {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: vec![INPUT_PLACEHOLDER.to_string(), OUTPUT_PLACEHOLDER.to_string()],
            order_source: OrderSource::default(),
        }
    }

    pub fn preset(preset: CollaboratorPreset) -> Self {
        match preset {
            CollaboratorPreset::Ph => Self::new("ph/ph"),
            CollaboratorPreset::Br => Self::new("br/br").with_args([
                "64",
                "532480",
                INPUT_PLACEHOLDER,
                OUTPUT_PLACEHOLDER,
            ]),
            CollaboratorPreset::Rabbit => Self::new("rabbit/reorder")
                .with_args([INPUT_PLACEHOLDER])
                .with_order_source(OrderSource::Stdout),
        }
    }

    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_order_source(mut self, source: OrderSource) -> Self {
        self.order_source = source;
        self
    }

    /// Arguments with placeholders substituted
    pub fn resolve_args(&self, input: &Path, output: &Path) -> Vec<String> {
        let input = input.to_string_lossy();
        let output = output.to_string_lossy();
        self.args
            .iter()
            .map(|arg| {
                arg.replace(INPUT_PLACEHOLDER, &input)
                    .replace(OUTPUT_PLACEHOLDER, &output)
            })
            .collect()
    }

    fn display_name(&self) -> String {
        self.program.display().to_string()
    }
}

/// Strategy that runs a [`Collaborator`] inside a working directory
#[derive(Debug, Clone, Serialize)]
pub struct ExternalDelegate {
    pub collaborator: Collaborator,
    pub work_dir: PathBuf,
    pub input_name: String,
    pub output_name: String,
}

impl ExternalDelegate {
    pub fn new(collaborator: Collaborator) -> Self {
        Self {
            collaborator,
            work_dir: PathBuf::from("."),
            input_name: "input.el".to_string(),
            output_name: "output.el".to_string(),
        }
    }

    pub fn with_work_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
        self.work_dir = work_dir.into();
        self
    }

    /// Write the weightless edge list the program reads
    fn write_input(&self, graph: &EdgeList) -> Result<PathBuf> {
        fs::create_dir_all(&self.work_dir)?;
        let path = self.work_dir.join(&self.input_name);
        let file = File::create(&path)?;
        write_pairs(BufWriter::new(file), &graph.edges)?;
        log::debug!("Wrote {} delegate input pairs to {}", graph.edge_count(), path.display());
        Ok(path)
    }

    /// Drop a permutation file left over from an earlier run
    fn clear_stale_order(&self) -> Result<()> {
        if let OrderSource::File(name) = &self.collaborator.order_source {
            let path = self.work_dir.join(name);
            match fs::remove_file(&path) {
                Ok(()) => log::debug!("Removed stale {}", path.display()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Program path as seen from the child's working directory
    fn program_path(&self) -> PathBuf {
        let program = &self.collaborator.program;
        if program.is_relative() && program.components().count() > 1 {
            fs::canonicalize(program).unwrap_or_else(|_| program.clone())
        } else {
            program.clone()
        }
    }

    fn run(&self) -> Result<Output> {
        let collaborator = &self.collaborator;
        let here = Path::new(".");
        let args = collaborator.resolve_args(&here.join(&self.input_name), &here.join(&self.output_name));

        log::info!(
            "Running {} {} in {}",
            collaborator.display_name(),
            args.join(" "),
            self.work_dir.display()
        );

        let output = Command::new(self.program_path())
            .args(&args)
            .current_dir(&self.work_dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ReorderError::collaborator(&collaborator.display_name(), format!("could not start: {}", e)))?;

        if !output.status.success() {
            return Err(ReorderError::CollaboratorFailure {
                program: collaborator.display_name(),
                reason: format!("process exited unsuccessfully ({})", output.status),
                exit_code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(output)
    }

    fn read_result(&self, output: &Output) -> Result<Vec<VertexId>> {
        let name = self.collaborator.display_name();
        let order = match &self.collaborator.order_source {
            OrderSource::Stdout => read_order(output.stdout.as_slice()),
            OrderSource::File(file) => {
                let path = self.work_dir.join(file);
                let file = File::open(&path).map_err(|e| {
                    ReorderError::collaborator(
                        &name,
                        format!("expected permutation file {} is unreadable: {}", path.display(), e),
                    )
                })?;
                read_order(BufReader::new(file))
            }
        };
        order.map_err(|e| ReorderError::collaborator(&name, format!("malformed permutation: {}", e)))
    }
}

impl OrderingStrategy for ExternalDelegate {
    fn name(&self) -> &'static str {
        "external"
    }

    fn compute(&self, graph: &EdgeList) -> Result<Permutation> {
        if !graph.is_dense() {
            log::warn!("Vertex ids are not contiguous from 0, the permutation file cannot cover them");
        }

        self.write_input(graph)?;
        self.clear_stale_order()?;
        let output = self.run()?;
        let order = self.read_result(&output)?;

        let name = self.collaborator.display_name();
        if order.len() != graph.vertex_count() {
            return Err(ReorderError::collaborator(
                &name,
                format!(
                    "permutation has {} entries but the graph has {} vertices",
                    order.len(),
                    graph.vertex_count()
                ),
            ));
        }
        log::info!("Read permutation of {} vertices from {}", order.len(), name);

        let perm = Permutation::from_order(order)
            .map_err(|e| ReorderError::collaborator(&name, e.to_string()))?;
        perm.check_covers(graph)?;
        Ok(perm)
    }
}
