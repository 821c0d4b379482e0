//! Error types for merkletools

use thiserror::Error;

/// Main error type for Merkle tree operations
#[derive(Error, Debug)]
pub enum MerkleError {
    /// Construction errors
    #[error("Unsupported hash algorithm: {name}")]
    UnsupportedAlgorithm { name: String },

    /// Leaf ingestion errors
    #[error("Leaf encoding failed: {reason}")]
    EncodingError { reason: String },

    #[error("Leaf index {index} out of range for {count} leaves")]
    LeafIndexOutOfRange { index: usize, count: usize },

    /// Proof-related errors
    #[error("Invalid proof step '{tag}': siblings can only be 'left' or 'right'")]
    InvalidProofStep { tag: String },

    #[error("Invalid proof format: {reason}")]
    InvalidProofFormat { reason: String },

    /// Configuration errors
    #[error("Configuration error: {reason}")]
    ConfigurationError { reason: String },

    #[error("Home directory not found")]
    HomeDirectoryNotFound,

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// Hex encoding/decoding errors
    #[error("Hex encoding error: {0}")]
    HexError(#[from] hex::FromHexError),
}

impl MerkleError {
    /// Create a new unsupported algorithm error
    pub fn unsupported_algorithm(name: impl Into<String>) -> Self {
        Self::UnsupportedAlgorithm { name: name.into() }
    }

    /// Create a new encoding error
    pub fn encoding_error(reason: impl Into<String>) -> Self {
        Self::EncodingError {
            reason: reason.into(),
        }
    }

    /// Create a new leaf index out of range error
    pub fn leaf_index_out_of_range(index: usize, count: usize) -> Self {
        Self::LeafIndexOutOfRange { index, count }
    }

    /// Create a new invalid proof step error
    pub fn invalid_proof_step(tag: impl Into<String>) -> Self {
        Self::InvalidProofStep { tag: tag.into() }
    }

    /// Create a new invalid proof format error
    pub fn invalid_proof_format(reason: impl Into<String>) -> Self {
        Self::InvalidProofFormat {
            reason: reason.into(),
        }
    }

    /// Create a new configuration error
    pub fn configuration_error(reason: impl Into<String>) -> Self {
        Self::ConfigurationError {
            reason: reason.into(),
        }
    }
}

/// Result type alias for merkletools operations
pub type Result<T> = std::result::Result<T, MerkleError>;
