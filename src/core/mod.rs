//! Core types and utilities for merkletools
//!
//! This module contains the node byte type, the error taxonomy and the
//! hash-function capability injected into every tree.

pub mod error;
pub mod hash;
pub mod types;

// Re-export commonly used items
pub use error::{MerkleError, Result};
pub use hash::{FnHasher, HashAlgorithm, HashFunction};
pub use types::{DigestInput, LeafValue, Level, NodeHash};
