use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use vertex_reorder::config::{Config, Direction};
use vertex_reorder::order::{
    Collaborator, CollaboratorPreset, DegreeRanking, ExternalDelegate, HubPartition,
    OrderSource, OrderingStrategy,
};
use vertex_reorder::pipeline::{self, Job};

#[derive(Parser, Debug)]
#[clap(
    name = "vertex-reorder",
    about = "Relabel the vertices of an edge list for better memory locality"
)]
struct Cli {
    #[clap(subcommand)]
    strategy: StrategyCommand,

    /// Also write the permutation, one new id per line
    #[clap(long, global = true)]
    order_out: Option<PathBuf>,

    /// Write a JSON summary of the run
    #[clap(long, global = true)]
    summary: Option<PathBuf>,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0", global = true)]
    threads: usize,

    /// Verbose logging
    #[clap(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum StrategyCommand {
    /// Rank vertices by degree
    Degree {
        #[clap(flatten)]
        common: CommonArgs,

        /// Order graph in ascending degree order
        #[clap(long, short)]
        ascending: bool,

        /// Use indegree for ordering
        #[clap(long, short)]
        indegree: bool,
    },

    /// Number hub vertices before all others
    Hub {
        #[clap(flatten)]
        common: CommonArgs,

        /// Order hubs in ascending degree order (with --sort-hubs)
        #[clap(long, short)]
        ascending: bool,

        /// Use indegree for hub classification
        #[clap(long, short)]
        indegree: bool,

        /// Sort hubs by degree instead of discovery order
        #[clap(long, short)]
        sort_hubs: bool,
    },

    /// Delegate ordering to an external reordering program
    External {
        #[clap(flatten)]
        common: CommonArgs,

        /// Invocation conventions of a known program
        #[clap(long, value_enum, default_value = "ph")]
        preset: CollaboratorPreset,

        /// Reordering program (defaults to the preset's path)
        #[clap(long, short)]
        program: Option<PathBuf>,

        /// Program argument, repeatable; {input} and {output} are substituted
        #[clap(long = "arg", allow_hyphen_values = true)]
        args: Vec<String>,

        /// Directory the program runs in
        #[clap(long, default_value = ".")]
        work_dir: PathBuf,

        /// Permutation file the program writes, relative to --work-dir
        #[clap(long, conflicts_with = "stdout_order")]
        order_file: Option<PathBuf>,

        /// Read the permutation from the program's standard output
        #[clap(long)]
        stdout_order: bool,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Input edge list
    input: PathBuf,

    /// Output edge list
    output: PathBuf,

    /// Maintain initial vertex ID 0
    #[clap(long = "maintain-zero", short = 'm', alias = "maintain")]
    maintain_zero: bool,

    /// Input graph is weighted
    #[clap(long, short)]
    weighted: bool,
}

impl StrategyCommand {
    fn into_job(self, cli_order_out: Option<PathBuf>, summary: Option<PathBuf>) -> (Job, Box<dyn OrderingStrategy>) {
        let (common, config, strategy): (CommonArgs, Config, Box<dyn OrderingStrategy>) = match self {
            StrategyCommand::Degree {
                common,
                ascending,
                indegree,
            } => {
                let config = Config::new(
                    common.weighted,
                    common.maintain_zero,
                    ascending,
                    Direction::from_indegree(indegree),
                    false,
                );
                let strategy: Box<dyn OrderingStrategy> =
                    Box::new(DegreeRanking::from_config(&config));
                (common, config, strategy)
            }
            StrategyCommand::Hub {
                common,
                ascending,
                indegree,
                sort_hubs,
            } => {
                let config = Config::new(
                    common.weighted,
                    common.maintain_zero,
                    ascending,
                    Direction::from_indegree(indegree),
                    sort_hubs,
                );
                let strategy: Box<dyn OrderingStrategy> =
                    Box::new(HubPartition::from_config(&config));
                (common, config, strategy)
            }
            StrategyCommand::External {
                common,
                preset,
                program,
                args,
                work_dir,
                order_file,
                stdout_order,
            } => {
                let config = Config::new(
                    common.weighted,
                    common.maintain_zero,
                    false,
                    Direction::Out,
                    false,
                );

                let mut collaborator = Collaborator::preset(preset);
                if let Some(program) = program {
                    collaborator = collaborator.with_program(program);
                }
                if !args.is_empty() {
                    collaborator = collaborator.with_args(args);
                }
                if stdout_order {
                    collaborator = collaborator.with_order_source(OrderSource::Stdout);
                } else if let Some(file) = order_file {
                    collaborator = collaborator.with_order_source(OrderSource::File(file));
                }

                let strategy: Box<dyn OrderingStrategy> =
                    Box::new(ExternalDelegate::new(collaborator).with_work_dir(work_dir));
                (common, config, strategy)
            }
        };

        let job = Job {
            input: common.input,
            output: common.output,
            order_out: cli_order_out,
            summary,
            config,
        };
        (job, strategy)
    }
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    // Set number of threads
    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        num_cpus::get()
    };

    log::debug!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    let (job, strategy) = args.strategy.into_job(args.order_out, args.summary);

    log::info!("Input: {}", job.input.display());
    log::info!("Output: {}", job.output.display());

    pipeline::run(&job, strategy.as_ref())?;

    log::info!("Reordering complete. Results saved to {}", job.output.display());

    Ok(())
}
