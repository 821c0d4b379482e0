//! Merkle tree implementation

use crate::core::{
    error::Result,
    hash::{HashAlgorithm, HashFunction},
    types::{DigestInput, LeafValue, Level, NodeHash},
};
use crate::proofs::proof::{validate_proof, Proof, ProofStep};
use tracing::{debug, trace};

/// Build every level of the tree from `leaves`.
///
/// Level 0 is the leaf sequence and the last level holds only the root.
/// Nodes are paired in order and hashed as `digest(left || right)`. A trailing
/// unpaired node is carried into the next level unchanged. No leaves means no
/// levels.
pub fn build_levels<H>(leaves: &[NodeHash], hasher: &H) -> Vec<Level>
where
    H: HashFunction + ?Sized,
{
    if leaves.is_empty() {
        return Vec::new();
    }

    let mut levels = Vec::new();
    let mut current: Level = leaves.to_vec();
    while current.len() > 1 {
        let next = next_level(&current, hasher);
        levels.push(std::mem::replace(&mut current, next));
    }
    levels.push(current);
    levels
}

fn next_level<H>(level: &[NodeHash], hasher: &H) -> Level
where
    H: HashFunction + ?Sized,
{
    let mut next = Vec::with_capacity((level.len() + 1) / 2);
    let mut pairs = level.chunks_exact(2);
    for pair in pairs.by_ref() {
        next.push(hasher.digest_pair(pair[0].as_bytes(), pair[1].as_bytes()));
    }
    // Odd node out is promoted as is
    if let [solo] = pairs.remainder() {
        next.push(solo.clone());
    }
    next
}

/// Derive the proof for `leaf_index` from already built `levels`.
///
/// Returns `None` when there are no levels or the index is out of range.
pub fn proof_from_levels(levels: &[Level], leaf_index: usize) -> Option<Proof> {
    let leaf_count = levels.first()?.len();
    if leaf_index >= leaf_count {
        return None;
    }

    let mut proof = Proof::default();
    let mut index = leaf_index;
    // The root level contributes nothing
    for level in &levels[..levels.len() - 1] {
        let len = level.len();
        if index == len - 1 && len % 2 == 1 {
            trace!(index, len, "carried node, no sibling at this level");
            index /= 2;
            continue;
        }

        let step = if index % 2 == 1 {
            ProofStep::left(level[index - 1].clone())
        } else {
            ProofStep::right(level[index + 1].clone())
        };
        proof.push(step);
        index /= 2;
    }

    Some(proof)
}

/// Merkle tree builder and prover.
///
/// Owns an append-only leaf sequence. The level structure is rebuilt from
/// scratch by [`MerkleTools::make_tree`]; any leaf mutation marks the tree as
/// not ready until the next build.
#[derive(Debug, Clone)]
pub struct MerkleTools<H = HashAlgorithm> {
    hasher: H,
    leaves: Vec<NodeHash>,
    levels: Option<Vec<Level>>,
    is_ready: bool,
}

impl MerkleTools<HashAlgorithm> {
    /// Create a tree using the named algorithm (e.g. `"sha256"`).
    ///
    /// Unknown names fail with `UnsupportedAlgorithm`.
    pub fn new(algorithm: &str) -> Result<Self> {
        Ok(Self::with_hasher(algorithm.parse::<HashAlgorithm>()?))
    }
}

impl Default for MerkleTools<HashAlgorithm> {
    fn default() -> Self {
        Self::with_hasher(HashAlgorithm::default())
    }
}

impl<H: HashFunction> MerkleTools<H> {
    /// Create a tree around an injected hash function
    pub fn with_hasher(hasher: H) -> Self {
        Self {
            hasher,
            leaves: Vec::new(),
            levels: None,
            is_ready: false,
        }
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Clear all leaves and levels. Leaf indices start over afterwards.
    pub fn reset_tree(&mut self) {
        self.leaves.clear();
        self.levels = None;
        self.is_ready = false;
    }

    /// Append a leaf.
    ///
    /// With `hash_before_insert` the value's digest is stored, otherwise the
    /// value's bytes are stored verbatim.
    pub fn add_leaf<V: LeafValue>(&mut self, value: V, hash_before_insert: bool) -> Result<()> {
        let leaf = self.prepare_leaf(&value, hash_before_insert)?;
        self.is_ready = false;
        self.leaves.push(leaf);
        Ok(())
    }

    /// Append several leaves.
    ///
    /// Every value is encoded before any is appended, so a failure leaves the
    /// existing leaves untouched.
    pub fn add_leaves<I>(&mut self, values: I, hash_before_insert: bool) -> Result<()>
    where
        I: IntoIterator,
        I::Item: LeafValue,
    {
        let prepared = values
            .into_iter()
            .map(|value| self.prepare_leaf(&value, hash_before_insert))
            .collect::<Result<Vec<_>>>()?;

        self.is_ready = false;
        self.leaves.extend(prepared);
        Ok(())
    }

    fn prepare_leaf<V>(&self, value: &V, hash_before_insert: bool) -> Result<NodeHash>
    where
        V: LeafValue + ?Sized,
    {
        let bytes = value.leaf_bytes()?;
        if hash_before_insert {
            Ok(self.hasher.digest(&bytes))
        } else {
            Ok(NodeHash::from(bytes.into_owned()))
        }
    }

    /// Number of leaves added since construction or the last reset
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Leaf value at `index`
    pub fn leaf(&self, index: usize) -> Option<&NodeHash> {
        self.leaves.get(index)
    }

    pub fn leaves(&self) -> &[NodeHash] {
        &self.leaves
    }

    /// Whether the levels reflect the current leaves
    pub fn is_ready(&self) -> bool {
        self.is_ready
    }

    /// Build the tree from the current leaves.
    ///
    /// Idempotent: rebuilding unchanged leaves yields identical levels.
    pub fn make_tree(&mut self) {
        self.is_ready = false;
        self.levels = None;

        if !self.leaves.is_empty() {
            let levels = build_levels(&self.leaves, &self.hasher);
            debug!(
                leaves = self.leaves.len(),
                depth = levels.len(),
                algorithm = self.hasher.name(),
                "built merkle tree"
            );
            self.levels = Some(levels);
        }

        self.is_ready = true;
    }

    /// Alias for [`MerkleTools::make_tree`]
    pub fn build(&mut self) {
        self.make_tree();
    }

    /// All levels, leaves first, when the tree is ready and non-empty
    pub fn levels(&self) -> Option<&[Level]> {
        if !self.is_ready {
            return None;
        }
        self.levels.as_deref()
    }

    /// Root of the tree, or `None` when the tree is empty or not built
    pub fn merkle_root(&self) -> Option<NodeHash> {
        self.levels()?.last()?.first().cloned()
    }

    /// Proof for the leaf at `index`, or `None` when the tree is not ready
    /// or the index is out of range
    pub fn get_proof(&self, index: usize) -> Option<Proof> {
        let levels = self.levels()?;
        let proof = proof_from_levels(levels, index)?;
        trace!(index, steps = proof.len(), "derived proof");
        Some(proof)
    }

    /// Validate `proof` for `target` against `root` using this tree's hash function
    pub fn validate_proof<'a, 'b>(
        &self,
        proof: &Proof,
        target: impl Into<DigestInput<'a>>,
        root: impl Into<DigestInput<'b>>,
    ) -> Result<bool> {
        validate_proof(&self.hasher, proof, target, root)
    }
}
