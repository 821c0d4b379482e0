//! Prove command implementation

use crate::cli::commands::build_tree;
use crate::cli::{CliContext, LeafArgs};
use crate::core::{error::MerkleError, hash::HashFunction};
use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::json;
use std::path::PathBuf;

/// Execute the prove command
pub fn execute(
    ctx: &CliContext,
    input: &LeafArgs,
    index: usize,
    output: Option<PathBuf>,
) -> Result<()> {
    let tree = build_tree(ctx, input)?;
    let proof = tree
        .get_proof(index)
        .ok_or_else(|| MerkleError::leaf_index_out_of_range(index, tree.leaf_count()))?;
    let root = tree.merkle_root().context("Built tree has no root")?;
    let leaf = tree.leaf(index).context("Leaf disappeared after build")?;

    if let Some(path) = &output {
        std::fs::write(path, proof.to_json_pretty()?)
            .with_context(|| format!("Failed to write proof to {}", path.display()))?;
    }

    if ctx.json {
        let report = json!({
            "algorithm": tree.hasher().name(),
            "index": index,
            "leaf": leaf.to_hex(),
            "root": root.to_hex(),
            "proof": proof,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}: {}", "Leaf".bold(), leaf.to_hex());
    println!("{}: {}", "Root".bold(), root.to_hex());
    println!("{}: {}", "Steps".bold(), proof.len());

    match &output {
        Some(path) => println!("{} Proof written to {}", "✓".green(), path.display()),
        None => println!("{}", proof.to_json_pretty()?),
    }

    Ok(())
}
