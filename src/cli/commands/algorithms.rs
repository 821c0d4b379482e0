//! Algorithms command implementation

use crate::cli::CliContext;
use crate::core::hash::{HashAlgorithm, HashFunction};
use anyhow::Result;
use colored::Colorize;
use serde_json::json;

/// Execute the algorithms command
pub fn execute(ctx: &CliContext) -> Result<()> {
    if ctx.json {
        let entries: Vec<_> = HashAlgorithm::ALL
            .iter()
            .map(|algorithm| {
                json!({
                    "name": algorithm.as_str(),
                    "output_size": algorithm.output_size(),
                    "active": *algorithm == ctx.algorithm,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for algorithm in HashAlgorithm::ALL {
        let marker = if algorithm == ctx.algorithm { "*" } else { " " };
        println!(
            "{} {:<12} {} bytes",
            marker.green(),
            algorithm.as_str(),
            algorithm.output_size()
        );
    }
    Ok(())
}
