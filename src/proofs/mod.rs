//! Merkle tree construction and membership proofs
//!
//! [`merkle`] holds the pure level builder and the stateful [`MerkleTools`]
//! wrapper; [`proof`] holds the proof model and stateless validation.

pub mod merkle;
pub mod proof;

// Re-export commonly used items
pub use merkle::{build_levels, proof_from_levels, MerkleTools};
pub use proof::{validate_proof, Proof, ProofPosition, ProofStep};
