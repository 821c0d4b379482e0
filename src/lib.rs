//! merkletools - binary Merkle trees with membership proofs
//!
//! Builds a binary hash tree over an ordered list of leaves, exposes the root
//! digest and produces or validates compact O(log n) membership proofs.
//!
//! # Core Features
//!
//! - **Pluggable hashing**: SHA-2, SHA-3, BLAKE2, SHA-1 or MD5 by name, or any
//!   [`HashFunction`] implementation injected at construction
//! - **Odd-node carry**: an unpaired trailing node is promoted unchanged
//!   instead of being hashed with itself
//! - **Portable proofs**: `[{"left": "<hex>"}, {"right": "<hex>"}]` JSON
//! - **Stateless verification**: [`validate_proof`] needs only the hash
//!   function and public values
//!
//! # Example Usage
//!
//! ```rust
//! use merkletools::MerkleTools;
//!
//! let mut tree = MerkleTools::new("sha256")?;
//! tree.add_leaves(["a", "b", "c"], true)?;
//! tree.make_tree();
//!
//! let root = tree.merkle_root().expect("tree has leaves");
//! let proof = tree.get_proof(2).expect("index is in range");
//! let leaf = tree.leaf(2).expect("index is in range");
//!
//! assert!(tree.validate_proof(&proof, leaf, &root)?);
//! assert!(tree.validate_proof(&proof, &leaf.to_hex(), &root.to_hex())?);
//! # Ok::<(), merkletools::MerkleError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod proofs;

// Re-export commonly used types
pub use core::{
    error::{MerkleError, Result},
    hash::{FnHasher, HashAlgorithm, HashFunction},
    types::{DigestInput, LeafValue, Level, NodeHash},
};

pub use proofs::{
    merkle::{build_levels, MerkleTools},
    proof::{validate_proof, Proof, ProofPosition, ProofStep},
};

pub use config::MerkleConfig;

/// Current version of merkletools
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
