//! qnav Command-Line Interface
//!
//! Runs the navigation algorithms from a terminal and prints either a
//! styled summary or the JSON record returned by `qnav_algos::api`.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use tracing_subscriber::EnvFilter;

use qnav_algos::circuits::IterationFormula;
use qnav_algos::problems::Point;

mod commands;

use commands::common::{Output, load_config};
use commands::anneal::parse_hazard;
use commands::{anneal, grover, phase, route, status, superposition, trajectory, version, vqe};

/// qnav - quantum-inspired navigation on a state-vector simulator
#[derive(Parser, Debug)]
#[command(name = "qnav")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML configuration file
    #[arg(short, long, global = true, env = "QNAV_CONFIG")]
    config: Option<PathBuf>,

    /// Seed for sampling and parameter initialisation
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Number of measurement shots
    #[arg(long, global = true)]
    shots: Option<u32>,

    /// Print the raw JSON record instead of a summary
    #[arg(long, global = true)]
    json: bool,

    /// Print the circuit listing after the summary
    #[arg(long, global = true)]
    show_circuit: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sample the interference circuit (environment prediction)
    Superposition {
        /// Register width
        #[arg(short = 'n', long, default_value = "3")]
        qubits: usize,
    },

    /// Search for marked routes with Grover amplification
    Grover {
        /// Register width
        #[arg(short = 'n', long, default_value = "3")]
        qubits: usize,

        /// Marked basis states, comma separated
        #[arg(short, long, value_delimiter = ',', default_value = "1,3")]
        targets: Vec<u64>,

        /// Iteration count formula
        #[arg(long, value_enum)]
        formula: Option<FormulaArg>,
    },

    /// Minimise fuel cost with a variational eigensolver
    Vqe {
        /// Register width
        #[arg(short = 'n', long, default_value = "4")]
        qubits: usize,

        /// Descent steps
        #[arg(long)]
        steps: Option<usize>,

        /// Gradient descent stepsize
        #[arg(long)]
        stepsize: Option<f64>,

        /// Per-qubit Hamiltonian weights, comma separated
        #[arg(long, value_delimiter = ',')]
        weights: Option<Vec<f64>>,
    },

    /// Estimate a trajectory phase
    Phase {
        /// Counting qubits
        #[arg(short = 'n', long, default_value = "3")]
        qubits: usize,

        /// Phase in radians (defaults to the configured phase)
        #[arg(short, long, allow_negative_numbers = true)]
        phase: Option<f64>,
    },

    /// Anneal a course adjustment away from hazards
    Anneal {
        /// Adjustment word width
        #[arg(short = 'n', long, default_value = "8")]
        qubits: usize,

        /// Craft x coordinate
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        x: f64,

        /// Craft y coordinate
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        y: f64,

        /// Hazards as x:y pairs, comma separated
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, value_parser = parse_hazard)]
        hazards: Vec<Point>,
    },

    /// Pick a route by Grover search over candidate scores
    Route {
        /// Route scores in [0, 1], comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        scores: Vec<f64>,
    },

    /// Rank trajectory phases for a velocity vector
    Trajectory {
        /// Counting qubits
        #[arg(short = 'n', long, default_value = "6")]
        qubits: usize,

        /// Velocity x component
        #[arg(long, allow_negative_numbers = true)]
        vx: f64,

        /// Velocity y component
        #[arg(long, allow_negative_numbers = true)]
        vy: f64,
    },

    /// Show engine status
    Status,

    /// Show version information
    Version,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FormulaArg {
    /// floor(π/4 · √(N/M))
    Amplified,
    /// floor(π/4 · √N)
    SingleTarget,
}

impl From<FormulaArg> for IterationFormula {
    fn from(arg: FormulaArg) -> Self {
        match arg {
            FormulaArg::Amplified => IterationFormula::Amplified,
            FormulaArg::SingleTarget => IterationFormula::SingleTarget,
        }
    }
}

fn execute(cli: Cli) -> anyhow::Result<()> {
    let output = Output {
        json: cli.json,
        show_circuit: cli.show_circuit,
    };

    if let Commands::Version = cli.command {
        version::execute();
        return Ok(());
    }

    let mut config = load_config(cli.config.as_deref(), cli.seed, cli.shots)?;

    match cli.command {
        Commands::Superposition { qubits } => superposition::execute(qubits, &config, output),

        Commands::Grover {
            qubits,
            targets,
            formula,
        } => {
            if let Some(formula) = formula {
                config.grover.iteration_formula = formula.into();
            }
            grover::execute(qubits, &targets, &config, output)
        }

        Commands::Vqe {
            qubits,
            steps,
            stepsize,
            weights,
        } => {
            if let Some(steps) = steps {
                config.vqe.steps = steps;
            }
            if let Some(stepsize) = stepsize {
                config.vqe.stepsize = stepsize;
            }
            if weights.is_some() {
                config.vqe.weights = weights;
            }
            vqe::execute(qubits, &config, output)
        }

        Commands::Phase { qubits, phase: p } => {
            let phase = p.unwrap_or(config.phase_estimation.default_phase);
            phase::execute(qubits, phase, &config, output)
        }

        Commands::Anneal {
            qubits,
            x,
            y,
            hazards,
        } => anneal::execute(qubits, Point::new(x, y), hazards, &config, output),

        Commands::Route { scores } => route::execute(&scores, &config, output),

        Commands::Trajectory { qubits, vx, vy } => {
            trajectory::execute(qubits, vx, vy, &config, output)
        }

        Commands::Status => status::execute(&config, output),

        Commands::Version => Ok(()),
    }
}

fn main() {
    let cli = Cli::parse();

    // Setup logging
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = execute(cli) {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}
