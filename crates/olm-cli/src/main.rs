//! OLM addon CLI
//!
//! Resolves the OLM manifests for a managed cluster from the command line.

mod cli;
mod commands;
mod error;
mod logging;

use std::sync::Arc;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::{CliError, Result};
use olm_core::OlmAgent;
use olm_core::bundled::bundled_store;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose)
        .map_err(|e| CliError::user(format!("Failed to initialize logging: {e}")))?;
    tracing::debug!("Verbose mode enabled");

    match cli.command {
        Commands::Manifests(args) => commands::run_manifests(&args),
        Commands::Capabilities { json } => {
            let agent = OlmAgent::new(Arc::new(bundled_store()));
            commands::run_capabilities(&agent, json)
        }
    }
}
