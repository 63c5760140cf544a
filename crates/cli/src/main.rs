//! Pipeline scheduling simulator CLI.
//!
//! This binary drives the scheduling core from JSON program files. It performs:
//! 1. **Run:** Schedules a program under one or more hazard policies and prints
//!    completion times, RAW dependences and total time per policy.
//! 2. **Deps:** Lists every RAW, WAR and WAW dependence of a program.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use pipesim_core::Instruction;
use pipesim_core::config::Config;
use pipesim_core::core::pipeline::{Dependence, PipelineKind, PipelineReport, Program};
use pipesim_core::sim::{Simulator, loader};

#[derive(Parser, Debug)]
#[command(
    name = "pipesim",
    author,
    version,
    about = "Five-stage pipeline scheduling simulator",
    long_about = "Compute per-instruction completion times of a five-stage pipeline under ideal, stall, and forwarding hazard policies.\n\nExamples:\n  pipesim run program.json\n  pipesim run program.json --policy stall --policy forwarding --json\n  pipesim deps program.json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Schedule a program and print one report per policy.
    Run(RunArgs),

    /// List every register dependence of a program.
    Deps {
        /// JSON program file (array of instruction records).
        program: PathBuf,

        /// Print dependences as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct RunArgs {
    /// JSON program file (array of instruction records).
    program: PathBuf,

    /// Policy to run; repeat for several. Defaults to the config selection.
    #[arg(short, long = "policy", value_enum)]
    policies: Vec<PolicyArg>,

    /// Run each policy on its own thread.
    #[arg(long)]
    parallel: bool,

    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log stage occupancy every cycle to stderr.
    #[arg(long)]
    trace: bool,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Print reports as JSON.
    #[arg(long)]
    json: bool,

    /// Append per-run statistics to each report.
    #[arg(long)]
    stats: bool,
}

/// Hazard policy as spelled on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    Ideal,
    Stall,
    Forwarding,
}

impl From<PolicyArg> for PipelineKind {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Ideal => Self::Ideal,
            PolicyArg::Stall => Self::Stall,
            PolicyArg::Forwarding => Self::Forwarding,
        }
    }
}

#[derive(Serialize)]
struct DepsOutput<'a> {
    instructions: Vec<&'a str>,
    dependences: &'a [Dependence],
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run(args) => cmd_run(&args),
        Commands::Deps { program, json } => {
            init_logging(false);
            cmd_deps(&program, json)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Installs the stderr subscriber. `RUST_LOG` wins over the default filter.
fn init_logging(trace: bool) {
    let default = if trace { "pipesim=info,pipesim_core=trace" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn cmd_run(args: &RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => loader::load_config(path)?,
        None => Config::default(),
    };
    init_logging(args.trace || config.general.trace_cycles);

    if !args.policies.is_empty() {
        config.pipeline.policies = args.policies.iter().copied().map(Into::into).collect();
    }
    config.pipeline.parallel |= args.parallel;

    let instructions = loader::load_program(&args.program)?;
    info!(
        program = %args.program.display(),
        instructions = instructions.len(),
        policies = ?config.pipeline.selected(),
        parallel = config.pipeline.parallel,
        "simulating"
    );
    let simulator = Simulator::new(instructions, &config);
    let reports = simulator.run()?;

    if args.output.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print_reports(&reports, args.output.stats);
    }
    Ok(())
}

fn print_reports(reports: &[PipelineReport], stats: bool) {
    for report in reports {
        println!("{report}");
        if stats {
            println!("{}", report.stats);
        }
        println!();
    }
}

fn cmd_deps(path: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let program = Program::new(loader::load_program(path)?);
    let dependences = program.dependences().dependences();
    debug!(
        program = %path.display(),
        dependences = dependences.len(),
        "dependences computed"
    );

    if json {
        let output = DepsOutput {
            instructions: program.instructions().iter().map(Instruction::text).collect(),
            dependences,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for (index, inst) in program.instructions().iter().enumerate() {
        println!("{index}\t{inst}");
    }
    println!();
    println!("Kind \tReg \t(Producer, Consumer)");
    for dep in dependences {
        println!("{dep}");
    }
    Ok(())
}
