//! Hash function capability for merkletools
//!
//! The tree never calls a concrete digest directly. It is handed a
//! [`HashFunction`] at construction time and keeps it for its whole lifetime.

use crate::core::error::{MerkleError, Result};
use crate::core::types::NodeHash;
use digest::DynDigest;
use blake2::{Blake2b512, Blake2s256};
use md5::Md5;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512, Sha512_224, Sha512_256};
use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512};
use std::fmt;
use std::str::FromStr;

/// A keyless cryptographic digest with a fixed-size output
pub trait HashFunction {
    /// Hash arbitrary data
    fn digest(&self, data: &[u8]) -> NodeHash;

    /// Hash `left || right`
    fn digest_pair(&self, left: &[u8], right: &[u8]) -> NodeHash {
        let mut buffer = Vec::with_capacity(left.len() + right.len());
        buffer.extend_from_slice(left);
        buffer.extend_from_slice(right);
        self.digest(&buffer)
    }

    /// Digest length in bytes
    fn output_size(&self) -> usize;

    /// Human readable algorithm name
    fn name(&self) -> &str;
}

impl<H: HashFunction + ?Sized> HashFunction for &H {
    fn digest(&self, data: &[u8]) -> NodeHash {
        (**self).digest(data)
    }

    fn digest_pair(&self, left: &[u8], right: &[u8]) -> NodeHash {
        (**self).digest_pair(left, right)
    }

    fn output_size(&self) -> usize {
        (**self).output_size()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<H: HashFunction + ?Sized> HashFunction for Box<H> {
    fn digest(&self, data: &[u8]) -> NodeHash {
        (**self).digest(data)
    }

    fn digest_pair(&self, left: &[u8], right: &[u8]) -> NodeHash {
        (**self).digest_pair(left, right)
    }

    fn output_size(&self) -> usize {
        (**self).output_size()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Supported digest algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha224,
    #[default]
    Sha256,
    Sha384,
    Sha512,
    Sha512_224,
    Sha512_256,
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
    /// BLAKE2b with a 64-byte digest
    Blake2b,
    /// BLAKE2s with a 32-byte digest
    Blake2s,
}

impl HashAlgorithm {
    /// Every supported algorithm, in listing order
    pub const ALL: [HashAlgorithm; 14] = [
        HashAlgorithm::Md5,
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha224,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha512,
        HashAlgorithm::Sha512_224,
        HashAlgorithm::Sha512_256,
        HashAlgorithm::Sha3_224,
        HashAlgorithm::Sha3_256,
        HashAlgorithm::Sha3_384,
        HashAlgorithm::Sha3_512,
        HashAlgorithm::Blake2b,
        HashAlgorithm::Blake2s,
    ];

    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha224 => "sha224",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
            HashAlgorithm::Sha512_224 => "sha512_224",
            HashAlgorithm::Sha512_256 => "sha512_256",
            HashAlgorithm::Sha3_224 => "sha3_224",
            HashAlgorithm::Sha3_256 => "sha3_256",
            HashAlgorithm::Sha3_384 => "sha3_384",
            HashAlgorithm::Sha3_512 => "sha3_512",
            HashAlgorithm::Blake2b => "blake2b",
            HashAlgorithm::Blake2s => "blake2s",
        }
    }

    /// Alternative spellings accepted when parsing, besides [`Self::as_str`]
    fn aliases(&self) -> &'static [&'static str] {
        match self {
            HashAlgorithm::Md5 => &["md-5"],
            HashAlgorithm::Sha1 => &["sha-1"],
            HashAlgorithm::Sha224 => &["sha-224"],
            HashAlgorithm::Sha256 => &["sha-256"],
            HashAlgorithm::Sha384 => &["sha-384"],
            HashAlgorithm::Sha512 => &["sha-512"],
            HashAlgorithm::Sha512_224 => &["sha512-224", "sha-512/224"],
            HashAlgorithm::Sha512_256 => &["sha512-256", "sha-512/256"],
            HashAlgorithm::Sha3_224 => &["sha3-224"],
            HashAlgorithm::Sha3_256 => &["sha3-256"],
            HashAlgorithm::Sha3_384 => &["sha3-384"],
            HashAlgorithm::Sha3_512 => &["sha3-512"],
            HashAlgorithm::Blake2b => &["blake2b512", "blake2b-512"],
            HashAlgorithm::Blake2s => &["blake2s256", "blake2s-256"],
        }
    }

    fn hasher(&self) -> Box<dyn DynDigest> {
        match self {
            HashAlgorithm::Md5 => Box::<Md5>::default(),
            HashAlgorithm::Sha1 => Box::<Sha1>::default(),
            HashAlgorithm::Sha224 => Box::<Sha224>::default(),
            HashAlgorithm::Sha256 => Box::<Sha256>::default(),
            HashAlgorithm::Sha384 => Box::<Sha384>::default(),
            HashAlgorithm::Sha512 => Box::<Sha512>::default(),
            HashAlgorithm::Sha512_224 => Box::<Sha512_224>::default(),
            HashAlgorithm::Sha512_256 => Box::<Sha512_256>::default(),
            HashAlgorithm::Sha3_224 => Box::<Sha3_224>::default(),
            HashAlgorithm::Sha3_256 => Box::<Sha3_256>::default(),
            HashAlgorithm::Sha3_384 => Box::<Sha3_384>::default(),
            HashAlgorithm::Sha3_512 => Box::<Sha3_512>::default(),
            HashAlgorithm::Blake2b => Box::<Blake2b512>::default(),
            HashAlgorithm::Blake2s => Box::<Blake2s256>::default(),
        }
    }
}

impl HashFunction for HashAlgorithm {
    fn digest(&self, data: &[u8]) -> NodeHash {
        let mut hasher = self.hasher();
        hasher.update(data);
        NodeHash::from(hasher.finalize().into_vec())
    }

    // Streams both halves instead of allocating the concatenation
    fn digest_pair(&self, left: &[u8], right: &[u8]) -> NodeHash {
        let mut hasher = self.hasher();
        hasher.update(left);
        hasher.update(right);
        NodeHash::from(hasher.finalize().into_vec())
    }

    fn output_size(&self) -> usize {
        match self {
            HashAlgorithm::Md5 => 16,
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha224 | HashAlgorithm::Sha512_224 | HashAlgorithm::Sha3_224 => 28,
            HashAlgorithm::Sha256
            | HashAlgorithm::Sha512_256
            | HashAlgorithm::Sha3_256
            | HashAlgorithm::Blake2s => 32,
            HashAlgorithm::Sha384 | HashAlgorithm::Sha3_384 => 48,
            HashAlgorithm::Sha512 | HashAlgorithm::Sha3_512 | HashAlgorithm::Blake2b => 64,
        }
    }

    fn name(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for HashAlgorithm {
    type Err = MerkleError;

    /// Case-insensitive. Accepts the canonical names ("sha256", "sha3_256",
    /// "blake2b") and the usual separated spellings ("SHA-256", "sha3-256").
    fn from_str(name: &str) -> Result<Self> {
        let normalized = name.trim().to_ascii_lowercase();

        HashAlgorithm::ALL
            .into_iter()
            .find(|algorithm| {
                algorithm.as_str() == normalized
                    || algorithm.aliases().contains(&normalized.as_str())
            })
            .ok_or_else(|| MerkleError::unsupported_algorithm(name))
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Adapts a plain digest closure into a [`HashFunction`]
pub struct FnHasher<F> {
    name: String,
    output_size: usize,
    function: F,
}

impl<F> FnHasher<F>
where
    F: Fn(&[u8]) -> Vec<u8>,
{
    /// Wrap `function`; its output size is measured once by hashing empty input
    pub fn new(name: impl Into<String>, function: F) -> Self {
        let output_size = function(&[]).len();
        Self {
            name: name.into(),
            output_size,
            function,
        }
    }
}

impl<F> HashFunction for FnHasher<F>
where
    F: Fn(&[u8]) -> Vec<u8>,
{
    fn digest(&self, data: &[u8]) -> NodeHash {
        NodeHash::from((self.function)(data))
    }

    fn output_size(&self) -> usize {
        self.output_size
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<F> fmt::Debug for FnHasher<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHasher")
            .field("name", &self.name)
            .field("output_size", &self.output_size)
            .finish()
    }
}
