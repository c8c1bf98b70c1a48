//! gi-recon - Give-Up Trade Reconciliation CLI
//!
//! Reconciles an Atlantis give-up extract against a GMI extract and exports
//! the classified results.
//!
//! # Commands
//!
//! - `gi-recon reconcile --atlantis <file> --gmi <file>` - Run a reconciliation
//! - `gi-recon columns --file <file> --source <side>` - Show the resolved column mapping
//! - `gi-recon check` - Validate configuration
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate wires the loader adapter,
//! the reconciliation kernel and the report sinks together.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use config::ReconConfig;

/// Give-up trade reconciliation CLI
#[derive(Parser)]
#[command(name = "gi-recon")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (optional)
    #[arg(short, long, global = true, default_value = "gi-recon.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile an Atlantis file against a GMI file
    Reconcile {
        /// Atlantis extract (CSV/XLS/XLSX)
        #[arg(short, long)]
        atlantis: PathBuf,

        /// GMI extract (CSV/XLS/XLSX)
        #[arg(short, long)]
        gmi: PathBuf,

        /// Pipeline (tp, go); defaults to the configured pipeline
        #[arg(short, long)]
        pipeline: Option<String>,

        /// Export destination; defaults to the configured output
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export format (xlsx, csv); defaults to the configured format
        #[arg(short, long)]
        export: Option<String>,

        /// Summary format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Skip the rate comparison
        #[arg(long)]
        no_rate: bool,
    },

    /// Show how a file's headers map onto the reconciliation columns
    Columns {
        /// File to inspect
        #[arg(short, long)]
        file: PathBuf,

        /// Which system produced the file (atlantis, gmi)
        #[arg(short, long)]
        source: String,

        /// Pipeline (tp, go); defaults to the configured pipeline
        #[arg(short, long)]
        pipeline: Option<String>,
    },

    /// Check configuration
    Check,
}

fn init_tracing(config: Option<&ReconConfig>, verbose: bool) {
    let level = if verbose {
        "debug"
    } else {
        config.map(|c| c.log_level.as_str()).unwrap_or("info")
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: Cli, config: ReconConfig) -> Result<()> {
    match cli.command {
        Commands::Reconcile {
            atlantis,
            gmi,
            pipeline,
            output,
            export,
            format,
            no_rate,
        } => commands::reconcile::run(
            &config,
            commands::reconcile::ReconcileArgs {
                atlantis,
                gmi,
                pipeline,
                output,
                export,
                format,
                no_rate,
            },
        ),
        Commands::Columns {
            file,
            source,
            pipeline,
        } => commands::columns::run(&config, &file, &source, pipeline.as_deref()),
        Commands::Check => commands::check::run(&config, &cli.config),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = ReconConfig::load_with_env_and_validate(&cli.config);
    init_tracing(config.as_ref().ok(), cli.verbose);

    let result = config
        .map_err(CliError::from)
        .and_then(|config| {
            debug!(config = %cli.config.display(), "Configuration loaded");
            run(cli, config)
        });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
