//! Verify command implementation

use crate::cli::CliContext;
use crate::proofs::{validate_proof, Proof};
use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::json;
use std::io::Read;

/// Execute the verify command, returning whether the proof holds
pub fn execute(ctx: &CliContext, proof_source: &str, target: &str, root: &str) -> Result<bool> {
    let content = if proof_source == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read proof from stdin")?;
        content
    } else {
        std::fs::read_to_string(proof_source)
            .with_context(|| format!("Failed to read proof from {}", proof_source))?
    };

    let proof = Proof::from_json(&content)?;
    let valid = validate_proof(&ctx.algorithm, &proof, target, root)?;
    tracing::debug!(steps = proof.len(), valid, "verified proof");

    if ctx.json {
        println!(
            "{}",
            json!({
                "algorithm": ctx.algorithm.as_str(),
                "steps": proof.len(),
                "valid": valid,
            })
        );
    } else if valid {
        println!("{} Proof is valid", "✓".green());
    } else {
        println!("{} Proof is invalid", "✗".red());
    }

    Ok(valid)
}
