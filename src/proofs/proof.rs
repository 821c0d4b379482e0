//! Membership proofs and their validation

use crate::core::{
    error::{MerkleError, Result},
    hash::HashFunction,
    types::{DigestInput, NodeHash},
};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Position of a sibling relative to the hash being folded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProofPosition {
    Left,
    Right,
}

impl ProofPosition {
    /// Tag used in the serialized proof
    pub fn as_str(&self) -> &'static str {
        match self {
            ProofPosition::Left => "left",
            ProofPosition::Right => "right",
        }
    }
}

impl FromStr for ProofPosition {
    type Err = MerkleError;

    fn from_str(tag: &str) -> Result<Self> {
        match tag {
            "left" => Ok(ProofPosition::Left),
            "right" => Ok(ProofPosition::Right),
            other => Err(MerkleError::invalid_proof_step(other)),
        }
    }
}

impl fmt::Display for ProofPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single element in a proof path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofStep {
    /// Whether the sibling is on the left or right
    pub position: ProofPosition,
    /// Value of the sibling node at this level
    pub hash: NodeHash,
}

impl ProofStep {
    pub fn left(hash: impl Into<NodeHash>) -> Self {
        Self {
            position: ProofPosition::Left,
            hash: hash.into(),
        }
    }

    pub fn right(hash: impl Into<NodeHash>) -> Self {
        Self {
            position: ProofPosition::Right,
            hash: hash.into(),
        }
    }

    /// Build a step from an external `(tag, value)` record.
    ///
    /// Any tag other than `left` or `right` is rejected.
    pub fn parse<'a>(tag: &str, value: impl Into<DigestInput<'a>>) -> Result<Self> {
        let position = tag.parse()?;
        let hash = NodeHash::from(value.into().to_bytes()?.into_owned());
        Ok(Self { position, hash })
    }

    fn from_value(value: &Value) -> Result<Self> {
        let record = value.as_object().ok_or_else(|| {
            let reason = format!("proof step must be an object, got {}", value);
            MerkleError::invalid_proof_format(reason)
        })?;

        if record.len() != 1 {
            return Err(MerkleError::invalid_proof_format(format!(
                "proof step must have exactly one entry, got {}",
                record.len()
            )));
        }

        let (tag, sibling) = record
            .iter()
            .next()
            .ok_or_else(|| MerkleError::invalid_proof_format("empty proof step"))?;
        let position: ProofPosition = tag.parse()?;
        let hash: NodeHash = serde_json::from_value(sibling.clone()).map_err(|e| {
            MerkleError::invalid_proof_format(format!("invalid sibling value for '{}': {}", tag, e))
        })?;

        Ok(Self { position, hash })
    }
}

impl Serialize for ProofStep {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.position.as_str(), &self.hash)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for ProofStep {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ProofStepVisitor)
    }
}

struct ProofStepVisitor;

impl<'de> Visitor<'de> for ProofStepVisitor {
    type Value = ProofStep;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a single-entry map {\"left\": ..} or {\"right\": ..}")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<ProofStep, A::Error> {
        let tag: String = map
            .next_key()?
            .ok_or_else(|| de::Error::custom("empty proof step"))?;
        let position: ProofPosition = tag.parse().map_err(de::Error::custom)?;
        let hash: NodeHash = map.next_value()?;

        if map.next_key::<String>()?.is_some() {
            return Err(de::Error::custom("proof step must have exactly one entry"));
        }

        Ok(ProofStep { position, hash })
    }
}

/// Ordered sibling path from a leaf to the root, leaf-adjacent step first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Proof {
    steps: Vec<ProofStep>,
}

impl Proof {
    pub fn new(steps: Vec<ProofStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[ProofStep] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<ProofStep> {
        self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProofStep> {
        self.steps.iter()
    }

    pub(crate) fn push(&mut self, step: ProofStep) {
        self.steps.push(step);
    }

    /// Serialize proof to compact JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(MerkleError::JsonSerialization)
    }

    /// Serialize proof to pretty JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(MerkleError::JsonSerialization)
    }

    /// Deserialize proof from JSON.
    ///
    /// Unknown direction tags fail with [`MerkleError::InvalidProofStep`].
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Convert an already parsed JSON document into a proof
    pub fn from_value(value: &Value) -> Result<Self> {
        let records = value.as_array().ok_or_else(|| {
            MerkleError::invalid_proof_format("proof must be a JSON array of steps")
        })?;

        let steps = records
            .iter()
            .map(ProofStep::from_value)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { steps })
    }
}

impl From<Vec<ProofStep>> for Proof {
    fn from(steps: Vec<ProofStep>) -> Self {
        Self::new(steps)
    }
}

impl<'a> IntoIterator for &'a Proof {
    type Item = &'a ProofStep;
    type IntoIter = std::slice::Iter<'a, ProofStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl IntoIterator for Proof {
    type Item = ProofStep;
    type IntoIter = std::vec::IntoIter<ProofStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

/// Replay `proof` from `target` and compare the result with `root`.
///
/// Needs only the hash function and public values, so a verifier does not
/// have to hold the tree. Both digests may be raw bytes or hex text. A proof
/// that is well formed but does not lead to `root` yields `Ok(false)`; only
/// undecodable hex is an error.
pub fn validate_proof<'a, 'b, H>(
    hasher: &H,
    proof: &Proof,
    target: impl Into<DigestInput<'a>>,
    root: impl Into<DigestInput<'b>>,
) -> Result<bool>
where
    H: HashFunction + ?Sized,
{
    let target = target.into().to_bytes()?;
    let root = root.into().to_bytes()?;

    if proof.is_empty() {
        return Ok(target == root);
    }

    let mut running = NodeHash::from(target.into_owned());
    for step in proof {
        running = match step.position {
            ProofPosition::Left => hasher.digest_pair(step.hash.as_bytes(), running.as_bytes()),
            ProofPosition::Right => hasher.digest_pair(running.as_bytes(), step.hash.as_bytes()),
        };
    }

    Ok(running.as_bytes() == &*root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hash::HashAlgorithm;

    #[test]
    fn test_step_serialization_shape() {
        let proof = Proof::new(vec![
            ProofStep::left(vec![0x01u8, 0x02]),
            ProofStep::right(vec![0xffu8]),
        ]);
        assert_eq!(proof.to_json().unwrap(), r#"[{"left":"0102"},{"right":"ff"}]"#);
    }

    #[test]
    fn test_from_json_accepts_hex_and_bytes() {
        let proof = Proof::from_json(r#"[{"left": "0102"}, {"right": [255]}]"#).unwrap();
        assert_eq!(
            proof,
            Proof::new(vec![ProofStep::left(vec![1u8, 2]), ProofStep::right(vec![255u8])])
        );
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        match Proof::from_json(r#"[{"middle": "00"}]"#) {
            Err(MerkleError::InvalidProofStep { tag }) => assert_eq!(tag, "middle"),
            other => panic!("Expected InvalidProofStep, got {:?}", other),
        }

        // Tags are case-sensitive
        assert!(matches!(
            Proof::from_json(r#"[{"Left": "00"}]"#),
            Err(MerkleError::InvalidProofStep { .. })
        ));
    }

    #[test]
    fn test_serde_deserialize_rejects_unknown_tag() {
        let result: std::result::Result<Proof, _> = serde_json::from_str(r#"[{"up": "00"}]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_step_shape() {
        assert!(matches!(
            Proof::from_json(r#"[{"left": "00", "right": "11"}]"#),
            Err(MerkleError::InvalidProofFormat { .. })
        ));
        assert!(matches!(
            Proof::from_json(r#"{"left": "00"}"#),
            Err(MerkleError::InvalidProofFormat { .. })
        ));
        assert!(matches!(
            Proof::from_json(r#"[{"left": "0g"}]"#),
            Err(MerkleError::InvalidProofFormat { .. })
        ));
    }

    #[test]
    fn test_parse_step() {
        let step = ProofStep::parse("right", "abcd").unwrap();
        assert_eq!(step, ProofStep::right(vec![0xabu8, 0xcd]));
        assert!(matches!(
            ProofStep::parse("sideways", "abcd"),
            Err(MerkleError::InvalidProofStep { .. })
        ));
    }

    #[test]
    fn test_empty_proof_compares_target_and_root() {
        let hasher = HashAlgorithm::Sha256;
        let leaf = hasher.digest(b"only");
        let empty = Proof::default();

        assert!(validate_proof(&hasher, &empty, &leaf, &leaf).unwrap());
        assert!(validate_proof(&hasher, &empty, &leaf, &leaf.to_hex()).unwrap());
        assert!(!validate_proof(&hasher, &empty, &leaf, &hasher.digest(b"other")).unwrap());
    }

    #[test]
    fn test_fold_direction() {
        let hasher = HashAlgorithm::Sha256;
        let target = hasher.digest(b"target");
        let sibling = hasher.digest(b"sibling");

        let left_root = hasher.digest_pair(sibling.as_bytes(), target.as_bytes());
        let right_root = hasher.digest_pair(target.as_bytes(), sibling.as_bytes());

        let left = Proof::new(vec![ProofStep::left(sibling.clone())]);
        let right = Proof::new(vec![ProofStep::right(sibling)]);

        assert!(validate_proof(&hasher, &left, &target, &left_root).unwrap());
        assert!(!validate_proof(&hasher, &left, &target, &right_root).unwrap());
        assert!(validate_proof(&hasher, &right, &target, &right_root).unwrap());
    }

    #[test]
    fn test_bad_hex_is_an_error() {
        let hasher = HashAlgorithm::Sha256;
        let proof = Proof::new(vec![ProofStep::left(vec![0u8; 32])]);
        assert!(matches!(
            validate_proof(&hasher, &proof, "not hex", &vec![0u8; 32]),
            Err(MerkleError::HexError(_))
        ));
    }
}
