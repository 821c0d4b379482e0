//! Command-line interface for merkletools

use clap::{Args, Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

pub mod commands;
pub mod context;

pub use context::CliContext;

/// merkletools - build Merkle trees and create or verify membership proofs
#[derive(Parser, Debug)]
#[command(
    name = "merkletools",
    version,
    about = "Build binary Merkle trees and create or verify membership proofs",
    long_about = "Builds a binary hash tree over an ordered list of leaves, prints its root and produces or validates compact membership proofs."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Hash algorithm, e.g. sha256, sha3_256 or blake2b (see `algorithms`)
    #[arg(short, long, global = true, env = "MERKLETOOLS_ALGORITHM")]
    pub algorithm: Option<String>,

    /// Path to configuration file
    #[arg(long, global = true, env = "MERKLETOOLS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where leaves come from and how they are inserted
#[derive(Args, Debug, Clone, Default)]
pub struct LeafArgs {
    /// Leaf values
    pub leaves: Vec<OsString>,

    /// Read leaves from a file, one per line
    #[arg(short, long, conflicts_with = "stdin")]
    pub file: Option<PathBuf>,

    /// Read leaves from stdin, one per line
    #[arg(long)]
    pub stdin: bool,

    /// Hash each leaf before insertion
    #[arg(long, conflicts_with = "hex")]
    pub hash_leaves: bool,

    /// Leaves are hex-encoded digests, inserted as decoded bytes
    #[arg(long)]
    pub hex: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the Merkle root of the given leaves
    Root {
        #[command(flatten)]
        input: LeafArgs,

        /// Print every level, leaves first
        #[arg(long)]
        levels: bool,
    },

    /// Generate a membership proof for one leaf
    Prove {
        #[command(flatten)]
        input: LeafArgs,

        /// Index of the leaf to prove (0-based)
        #[arg(short, long)]
        index: usize,

        /// Write the proof JSON to a file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Verify a membership proof against a root
    Verify {
        /// Proof JSON file, or '-' for stdin
        #[arg(short, long)]
        proof: String,

        /// Leaf digest as hex
        #[arg(short, long)]
        target: String,

        /// Trusted root as hex
        #[arg(short, long)]
        root: String,
    },

    /// Manage configuration
    Config {
        /// Configuration key to get/set
        key: Option<String>,

        /// Configuration value to set
        value: Option<String>,

        /// List all configuration values
        #[arg(short, long)]
        list: bool,

        /// Unset a configuration value
        #[arg(long)]
        unset: bool,

        /// Show configuration file location
        #[arg(long)]
        show_origin: bool,
    },

    /// List supported hash algorithms
    Algorithms,
}
