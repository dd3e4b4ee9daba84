//! qvec Command-Line Interface
//!
//! The main entry point for the qvec CLI tool.
//!
//! ```text
//!   qvec run -i bell.json -s 1024 --seed 42
//!   qvec bell -f json
//!   qvec gates
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{bell, gates, run, version};
use config::Config;

/// qvec - dense statevector simulation of small quantum circuits
#[derive(Parser)]
#[command(name = "qvec")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (defaults to ~/.qvec/config.yaml when present)
    #[arg(short, long, global = true, env = "QVEC_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one or more JSON program files
    Run {
        /// Input program files (JSON)
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Number of shots
        #[arg(short, long, default_value = "1024", allow_negative_numbers = true)]
        shots: i64,

        /// Sampling seed (overrides the configured seed)
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Print the exact outcome distribution instead of sampling
        #[arg(long)]
        exact: bool,
    },

    /// Prepare and sample a Bell pair
    Bell {
        /// Number of shots
        #[arg(short, long, default_value = "1024", allow_negative_numbers = true)]
        shots: i64,

        /// Sampling seed (overrides the configured seed)
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// List supported gates
    Gates,

    /// Show version information
    Version,
}

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Histogram table
    Table,
    /// Pretty-printed JSON
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = execute(cli).await {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

async fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    // Setup logging: -v flags win over the configured level
    let filter = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    debug!("Loaded configuration: {:?}", config);

    match cli.command {
        Commands::Run {
            input,
            shots,
            seed,
            format,
            exact,
        } => run::execute(&input, shots, seed, format, exact, &config).await,

        Commands::Bell {
            shots,
            seed,
            format,
        } => bell::execute(shots, seed, format, &config),

        Commands::Gates => {
            gates::execute();
            Ok(())
        }

        Commands::Version => {
            version::execute();
            Ok(())
        }
    }
}
