//! IDE Configuration CLI
//!
//! Applies an `ide-config.yaml` document to a project's `.idea/` files.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: cannot initialize logging: {}", "warning".yellow(), e);
    }
    tracing::debug!(command = ?cli.command, "Starting");

    match cli.command {
        Commands::Apply {
            config,
            project,
            dry_run,
        } => commands::run_apply(&config, &project, dry_run),
        Commands::Validate { config, json } => commands::run_validate(&config, json),
    }
}
