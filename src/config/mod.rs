//! Configuration management for merkletools
//!
//! Stores command-line defaults (hash algorithm, leaf hashing) in
//! ~/.merkletools/config.toml

pub mod merkle_config;

// Re-export commonly used items
pub use merkle_config::{ConfigKey, ConfigValue, HashConfig, MerkleConfig};
