//! merkletools CLI
//!
//! Command-line interface for building Merkle trees and checking membership proofs.

use anyhow::Result;
use clap::Parser;
use merkletools::cli::{commands, Cli, CliContext, Commands};
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose { "merkletools=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let ctx = CliContext::from_cli(&cli)?;

    // Execute the command
    match cli.command {
        Commands::Root { input, levels } => commands::root::execute(&ctx, &input, levels)?,
        Commands::Prove { input, index, output } => {
            commands::prove::execute(&ctx, &input, index, output)?
        },
        Commands::Verify { proof, target, root } => {
            if !commands::verify::execute(&ctx, &proof, &target, &root)? {
                return Ok(ExitCode::FAILURE);
            }
        },
        Commands::Config { key, value, list, unset, show_origin } => {
            commands::config::execute(&ctx, key, value, list, unset, show_origin)?
        },
        Commands::Algorithms => commands::algorithms::execute(&ctx)?,
    }

    Ok(ExitCode::SUCCESS)
}
