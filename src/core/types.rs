//! Core data types for merkletools

use crate::core::error::{MerkleError, Result};
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

/// Byte value of a tree node: a leaf, an intermediate digest or the root.
///
/// Leaves inserted verbatim may have any length, so unlike a fixed-size
/// digest this is backed by a `Vec<u8>`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NodeHash(Vec<u8>);

impl NodeHash {
    /// Create a NodeHash from raw bytes
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        NodeHash(bytes.into())
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume and return the underlying bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Create a NodeHash from a hex string (either case, optional `0x` prefix)
    pub fn from_hex(hex: &str) -> std::result::Result<Self, hex::FromHexError> {
        decode_hex(hex).map(NodeHash)
    }

    /// Convert to lowercase hex string
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Number of bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn decode_hex(hex: &str) -> std::result::Result<Vec<u8>, hex::FromHexError> {
    let trimmed = hex.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    hex::decode(digits)
}

impl fmt::Display for NodeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

impl fmt::Debug for NodeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.to_hex();
        if hex.len() > 16 {
            write!(f, "NodeHash({}..)", &hex[..16])
        } else {
            write!(f, "NodeHash({})", hex)
        }
    }
}

impl AsRef<[u8]> for NodeHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for NodeHash {
    fn from(bytes: Vec<u8>) -> Self {
        NodeHash(bytes)
    }
}

impl From<&[u8]> for NodeHash {
    fn from(bytes: &[u8]) -> Self {
        NodeHash(bytes.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for NodeHash {
    fn from(bytes: [u8; N]) -> Self {
        NodeHash(bytes.to_vec())
    }
}

impl PartialEq<[u8]> for NodeHash {
    fn eq(&self, other: &[u8]) -> bool {
        self.0 == other
    }
}

// Serialized as hex strings instead of byte arrays
impl Serialize for NodeHash {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for NodeHash {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NodeHashVisitor)
    }
}

struct NodeHashVisitor;

impl<'de> Visitor<'de> for NodeHashVisitor {
    type Value = NodeHash;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a hex string or a byte array")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<NodeHash, E> {
        NodeHash::from_hex(v).map_err(E::custom)
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> std::result::Result<NodeHash, E> {
        Ok(NodeHash::from(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<NodeHash, A::Error> {
        let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(byte) = seq.next_element::<u8>()? {
            bytes.push(byte);
        }
        Ok(NodeHash(bytes))
    }
}

/// One depth-layer of the tree
pub type Level = Vec<NodeHash>;

/// A digest handed to proof validation, either as raw bytes or hex text
#[derive(Debug, Clone, Copy)]
pub enum DigestInput<'a> {
    Bytes(&'a [u8]),
    Hex(&'a str),
}

impl<'a> DigestInput<'a> {
    /// Resolve to raw bytes, decoding hex when needed
    pub fn to_bytes(&self) -> Result<Cow<'a, [u8]>> {
        match *self {
            DigestInput::Bytes(bytes) => Ok(Cow::Borrowed(bytes)),
            DigestInput::Hex(text) => Ok(Cow::Owned(decode_hex(text)?)),
        }
    }
}

impl<'a> From<&'a [u8]> for DigestInput<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        DigestInput::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for DigestInput<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        DigestInput::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for DigestInput<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        DigestInput::Bytes(bytes)
    }
}

impl<'a> From<&'a NodeHash> for DigestInput<'a> {
    fn from(hash: &'a NodeHash) -> Self {
        DigestInput::Bytes(hash.as_bytes())
    }
}

impl<'a> From<&'a str> for DigestInput<'a> {
    fn from(text: &'a str) -> Self {
        DigestInput::Hex(text)
    }
}

impl<'a> From<&'a String> for DigestInput<'a> {
    fn from(text: &'a String) -> Self {
        DigestInput::Hex(text)
    }
}

/// Anything that can be turned into leaf bytes.
///
/// Text is always encoded as UTF-8. OS strings and paths that are not valid
/// UTF-8 fail with [`MerkleError::EncodingError`].
pub trait LeafValue {
    fn leaf_bytes(&self) -> Result<Cow<'_, [u8]>>;
}

impl<T: LeafValue + ?Sized> LeafValue for &T {
    fn leaf_bytes(&self) -> Result<Cow<'_, [u8]>> {
        (**self).leaf_bytes()
    }
}

impl LeafValue for [u8] {
    fn leaf_bytes(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self))
    }
}

impl<const N: usize> LeafValue for [u8; N] {
    fn leaf_bytes(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self))
    }
}

impl LeafValue for Vec<u8> {
    fn leaf_bytes(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self))
    }
}

impl LeafValue for NodeHash {
    fn leaf_bytes(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self.as_bytes()))
    }
}

impl LeafValue for str {
    fn leaf_bytes(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self.as_bytes()))
    }
}

impl LeafValue for String {
    fn leaf_bytes(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self.as_bytes()))
    }
}

impl LeafValue for OsStr {
    fn leaf_bytes(&self) -> Result<Cow<'_, [u8]>> {
        self.to_str()
            .map(|s| Cow::Borrowed(s.as_bytes()))
            .ok_or_else(|| MerkleError::encoding_error(format!("{:?} is not valid UTF-8", self)))
    }
}

impl LeafValue for OsString {
    fn leaf_bytes(&self) -> Result<Cow<'_, [u8]>> {
        self.as_os_str().leaf_bytes()
    }
}

impl LeafValue for Path {
    fn leaf_bytes(&self) -> Result<Cow<'_, [u8]>> {
        self.as_os_str().leaf_bytes()
    }
}

impl LeafValue for PathBuf {
    fn leaf_bytes(&self) -> Result<Cow<'_, [u8]>> {
        self.as_os_str().leaf_bytes()
    }
}
