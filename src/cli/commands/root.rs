//! Root command implementation

use crate::cli::commands::build_tree;
use crate::cli::{CliContext, LeafArgs};
use crate::core::hash::HashFunction;
use anyhow::Result;
use colored::Colorize;
use serde_json::json;

/// Execute the root command
pub fn execute(ctx: &CliContext, input: &LeafArgs, show_levels: bool) -> Result<()> {
    let tree = build_tree(ctx, input)?;
    let root = tree.merkle_root();

    if ctx.json {
        let mut output = json!({
            "algorithm": tree.hasher().name(),
            "leaf_count": tree.leaf_count(),
            "root": root.as_ref().map(|r| r.to_hex()),
        });
        if show_levels {
            output["levels"] = json!(tree.levels().unwrap_or_default());
        }
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let Some(root) = root else {
        eprintln!("{}", "No leaves given, the tree has no root".yellow());
        return Ok(());
    };

    if ctx.verbose {
        println!("{}: {}", "Algorithm".bold(), tree.hasher().name());
        println!("{}: {}", "Leaves".bold(), tree.leaf_count());
    }

    if show_levels {
        for (depth, level) in tree.levels().unwrap_or_default().iter().enumerate() {
            let nodes: Vec<String> = level.iter().map(|node| node.to_hex()).collect();
            println!("{} {}", format!("Level {}:", depth).bold(), nodes.join(" "));
        }
    }

    println!("{}", root.to_hex());
    Ok(())
}
