//! CLI command implementations

pub mod algorithms;
pub mod config;
pub mod prove;
pub mod root;
pub mod verify;

// Common utilities for commands
use crate::cli::{CliContext, LeafArgs};
use crate::core::{error::MerkleError, hash::HashAlgorithm, types::NodeHash};
use crate::proofs::MerkleTools;
use anyhow::{Context, Result};
use std::ffi::OsString;
use std::io::Read;

/// Collect raw leaf values from a file, stdin or the positional arguments
pub fn load_leaves(input: &LeafArgs) -> Result<Vec<OsString>> {
    if let Some(path) = &input.file {
        let content = std::fs::read(path)
            .with_context(|| format!("Failed to read leaves from {}", path.display()))?;
        return Ok(split_lines(&content)?);
    }

    if input.stdin {
        let mut content = Vec::new();
        std::io::stdin()
            .read_to_end(&mut content)
            .context("Failed to read leaves from stdin")?;
        return Ok(split_lines(&content)?);
    }

    Ok(input.leaves.clone())
}

/// One leaf per line, `\n` or `\r\n` terminated. Every line must be UTF-8.
fn split_lines(content: &[u8]) -> std::result::Result<Vec<OsString>, MerkleError> {
    if content.is_empty() {
        return Ok(Vec::new());
    }

    let content = content.strip_suffix(b"\n").unwrap_or(content);
    content
        .split(|byte| *byte == b'\n')
        .enumerate()
        .map(|(number, line)| {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            std::str::from_utf8(line).map(OsString::from).map_err(|e| {
                let reason = format!("line {} is not valid UTF-8: {}", number + 1, e);
                MerkleError::encoding_error(reason)
            })
        })
        .collect()
}

/// Build a ready tree from the command's leaf arguments
pub fn build_tree(ctx: &CliContext, input: &LeafArgs) -> Result<MerkleTools<HashAlgorithm>> {
    let values = load_leaves(input)?;
    let mut tree = MerkleTools::with_hasher(ctx.algorithm);

    if input.hex {
        let digests = values
            .iter()
            .map(|value| -> std::result::Result<NodeHash, MerkleError> {
                let text = value.to_str().ok_or_else(|| {
                    MerkleError::encoding_error(format!("{:?} is not valid UTF-8", value))
                })?;
                Ok(NodeHash::from_hex(text)?)
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        tree.add_leaves(digests, false)?;
    } else {
        tree.add_leaves(&values, input.hash_leaves || ctx.hash_leaves)?;
    }

    tree.make_tree();
    Ok(tree)
}
