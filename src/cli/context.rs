//! CLI context resolved from global options and the configuration file

use crate::cli::Cli;
use crate::config::MerkleConfig;
use crate::core::error::Result;
use crate::core::hash::HashAlgorithm;
use std::path::PathBuf;

/// Context containing resolved global options
#[derive(Debug, Clone)]
pub struct CliContext {
    pub algorithm: HashAlgorithm,
    /// Leaf hashing default from the configuration file
    pub hash_leaves: bool,
    pub json: bool,
    pub verbose: bool,
    pub config_path: PathBuf,
}

impl CliContext {
    /// Resolve options; a command-line algorithm overrides the configured one
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config_path = match &cli.config {
            Some(path) => path.clone(),
            None => MerkleConfig::get_config_path()?,
        };
        let config = MerkleConfig::load_from(&config_path)?;

        let algorithm = match &cli.algorithm {
            Some(name) => name.parse()?,
            None => config.algorithm()?,
        };

        Ok(Self {
            algorithm,
            hash_leaves: config.hash_leaves(),
            json: cli.json,
            verbose: cli.verbose,
            config_path,
        })
    }

    pub fn load_config(&self) -> Result<MerkleConfig> {
        MerkleConfig::load_from(&self.config_path)
    }
}
