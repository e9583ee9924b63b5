//! # lexcase CLI entry point
//!
//! Parses command-line arguments, installs logging, loads the engine
//! configuration and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lexcase_cli::input::load_config;
use lexcase_cli::progress::{run_progress, ProgressArgs};
use lexcase_cli::resolve::{run_resolve, ResolveArgs};
use lexcase_cli::summary::{run_summary, SummaryArgs};
use lexcase_cli::table::{run_table, TableArgs};

/// Legal case lifecycle engine.
///
/// Resolves case snapshots into their canonical workflow status and renders
/// the progress, SLA and dashboard views derived from it.
#[derive(Parser, Debug)]
#[command(name = "lexcase", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Engine configuration file (YAML). Overrides `LEXCASE_CONFIG`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve a snapshot to its lifecycle status.
    Resolve(ResolveArgs),

    /// Show step-indexed progress for a snapshot.
    Progress(ProgressArgs),

    /// Dashboard summary for one or more snapshots.
    Summary(SummaryArgs),

    /// Print the status presentation table.
    Table(TableArgs),
}

fn init_tracing(verbose: u8, json: bool) {
    // RUST_LOG wins over -v.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };

    let result = match &cli.command {
        Commands::Resolve(args) => run_resolve(args, &config),
        Commands::Progress(args) => run_progress(args),
        Commands::Summary(args) => run_summary(args, &config),
        Commands::Table(args) => run_table(args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
