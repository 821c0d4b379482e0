//! User configuration management
//!
//! Defaults for the command line, stored in ~/.merkletools/config.toml

use crate::core::error::{MerkleError, Result};
use crate::core::hash::HashAlgorithm;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Configuration for merkletools
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MerkleConfig {
    /// Hashing configuration
    #[serde(default)]
    pub hash: HashConfig,
}

/// Hashing configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HashConfig {
    /// Default hash algorithm name
    pub algorithm: Option<String>,
    /// Hash leaves before insertion by default
    pub leaves: Option<bool>,
}

/// Configuration value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    String(String),
    Boolean(bool),
}

impl ConfigValue {
    /// Parse a command-line value; `true`/`false` become booleans
    pub fn parse(raw: &str) -> Self {
        match raw {
            "true" => ConfigValue::Boolean(true),
            "false" => ConfigValue::Boolean(false),
            other => ConfigValue::String(other.to_string()),
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::String(s) => write!(f, "{}", s),
            ConfigValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// Configuration key for reading and setting values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    HashAlgorithm,
    HashLeaves,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 2] = [ConfigKey::HashAlgorithm, ConfigKey::HashLeaves];

    pub fn parse(key: &str) -> Result<Self> {
        match key {
            "hash.algorithm" => Ok(ConfigKey::HashAlgorithm),
            "hash.leaves" => Ok(ConfigKey::HashLeaves),
            _ => Err(MerkleError::configuration_error(format!(
                "unknown configuration key: {}",
                key
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::HashAlgorithm => "hash.algorithm",
            ConfigKey::HashLeaves => "hash.leaves",
        }
    }
}

impl MerkleConfig {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Load configuration from `path`, falling back to defaults when absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: MerkleConfig = toml::from_str(&content).map_err(|e| {
            MerkleError::configuration_error(format!("Failed to parse config: {}", e))
        })?;

        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            MerkleError::configuration_error(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the path to the configuration file
    pub fn get_config_path() -> Result<PathBuf> {
        let user_dirs = UserDirs::new().ok_or(MerkleError::HomeDirectoryNotFound)?;
        Ok(user_dirs.home_dir().join(".merkletools").join("config.toml"))
    }

    /// Get a configuration value
    pub fn get(&self, key: ConfigKey) -> Option<ConfigValue> {
        match key {
            ConfigKey::HashAlgorithm => self.hash.algorithm.clone().map(ConfigValue::String),
            ConfigKey::HashLeaves => self.hash.leaves.map(ConfigValue::Boolean),
        }
    }

    /// Set a configuration value
    pub fn set(&mut self, key: ConfigKey, value: ConfigValue) -> Result<()> {
        match (key, value) {
            (ConfigKey::HashAlgorithm, ConfigValue::String(name)) => {
                // Reject names the tree could not be built with
                let algorithm: HashAlgorithm = name.parse()?;
                self.hash.algorithm = Some(algorithm.to_string());
            },
            (ConfigKey::HashLeaves, ConfigValue::Boolean(flag)) => {
                self.hash.leaves = Some(flag);
            },
            (ConfigKey::HashAlgorithm, _) => {
                return Err(MerkleError::configuration_error(
                    "hash.algorithm must be a string",
                ));
            },
            (ConfigKey::HashLeaves, _) => {
                return Err(MerkleError::configuration_error(
                    "hash.leaves must be true or false",
                ));
            },
        }
        Ok(())
    }

    /// Remove a configuration value
    pub fn unset(&mut self, key: ConfigKey) {
        match key {
            ConfigKey::HashAlgorithm => self.hash.algorithm = None,
            ConfigKey::HashLeaves => self.hash.leaves = None,
        }
    }

    /// All keys that currently hold a value
    pub fn list(&self) -> Vec<(ConfigKey, ConfigValue)> {
        ConfigKey::ALL
            .into_iter()
            .filter_map(|key| self.get(key).map(|value| (key, value)))
            .collect()
    }

    /// Resolved hash algorithm, `sha256` when unset
    pub fn algorithm(&self) -> Result<HashAlgorithm> {
        match &self.hash.algorithm {
            Some(name) => name.parse(),
            None => Ok(HashAlgorithm::default()),
        }
    }

    /// Whether leaves are hashed before insertion, `false` when unset
    pub fn hash_leaves(&self) -> bool {
        self.hash.leaves.unwrap_or(false)
    }
}
