//! Hash function family for the membership filter
//!
//! A handful of named digest algorithms is stretched into as many hash
//! functions as the filter needs: round `i` uses algorithm
//! `algorithms[i % len]` over `item ++ decimal(i)`. The digest is read as a
//! big-endian unsigned integer and reduced modulo the filter capacity.
//!
//! Salting by the round index keeps every function deterministic, so two
//! filters built from the same configuration set identical bits.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::Digest;

use crate::error::ConfigError;

/// Algorithm used when a configuration names none
pub const DEFAULT_ALGORITHM: HashAlgorithm = HashAlgorithm::Sha256;

/// Closed set of supported digest algorithms
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha512_224,
    Sha512_256,
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
    Keccak256,
    Blake2b512,
    Blake2s256,
    Blake3,
}

impl HashAlgorithm {
    /// Every supported algorithm, in display order
    pub const ALL: [HashAlgorithm; 16] = [
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
        HashAlgorithm::Keccak256,
        HashAlgorithm::Blake2b512,
        HashAlgorithm::Blake2s256,
        HashAlgorithm::Blake3,
    ];

    /// Canonical lowercase name
    pub fn name(self) -> &'static str {
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
            HashAlgorithm::Keccak256 => "keccak256",
            HashAlgorithm::Blake2b512 => "blake2b",
            HashAlgorithm::Blake2s256 => "blake2s",
            HashAlgorithm::Blake3 => "blake3",
        }
    }

    /// Comma-separated list of supported names, for error messages
    pub fn supported_names() -> String {
        Self::ALL
            .iter()
            .map(|a| a.name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Digest length in bytes
    pub fn output_len(self) -> usize {
        match self {
            HashAlgorithm::Md5 => 16,
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha224 | HashAlgorithm::Sha512_224 | HashAlgorithm::Sha3_224 => 28,
            HashAlgorithm::Sha256
            | HashAlgorithm::Sha512_256
            | HashAlgorithm::Sha3_256
            | HashAlgorithm::Keccak256
            | HashAlgorithm::Blake2s256
            | HashAlgorithm::Blake3 => 32,
            HashAlgorithm::Sha384 | HashAlgorithm::Sha3_384 => 48,
            HashAlgorithm::Sha512 | HashAlgorithm::Sha3_512 | HashAlgorithm::Blake2b512 => 64,
        }
    }

    /// Compute the digest of `parts`, fed in order as one message
    pub fn digest(self, parts: &[&[u8]]) -> Vec<u8> {
        match self {
            HashAlgorithm::Md5 => digest_with::<md5::Md5>(parts),
            HashAlgorithm::Sha1 => digest_with::<sha1::Sha1>(parts),
            HashAlgorithm::Sha224 => digest_with::<sha2::Sha224>(parts),
            HashAlgorithm::Sha256 => digest_with::<sha2::Sha256>(parts),
            HashAlgorithm::Sha384 => digest_with::<sha2::Sha384>(parts),
            HashAlgorithm::Sha512 => digest_with::<sha2::Sha512>(parts),
            HashAlgorithm::Sha512_224 => digest_with::<sha2::Sha512_224>(parts),
            HashAlgorithm::Sha512_256 => digest_with::<sha2::Sha512_256>(parts),
            HashAlgorithm::Sha3_224 => digest_with::<sha3::Sha3_224>(parts),
            HashAlgorithm::Sha3_256 => digest_with::<sha3::Sha3_256>(parts),
            HashAlgorithm::Sha3_384 => digest_with::<sha3::Sha3_384>(parts),
            HashAlgorithm::Sha3_512 => digest_with::<sha3::Sha3_512>(parts),
            HashAlgorithm::Keccak256 => digest_with::<sha3::Keccak256>(parts),
            HashAlgorithm::Blake2b512 => digest_with::<blake2::Blake2b512>(parts),
            HashAlgorithm::Blake2s256 => digest_with::<blake2::Blake2s256>(parts),
            HashAlgorithm::Blake3 => {
                let mut hasher = blake3::Hasher::new();
                for part in parts {
                    hasher.update(part);
                }
                hasher.finalize().as_bytes().to_vec()
            }
        }
    }

    /// Hex encoding of the digest, mainly for logs and diagnostics
    pub fn hex_digest(self, data: &[u8]) -> String {
        hex::encode(self.digest(&[data]))
    }
}

/// RustCrypto algorithms all share the `Digest` capability
fn digest_with<D: Digest>(parts: &[&[u8]]) -> Vec<u8> {
    let mut hasher = D::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().to_vec()
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = ConfigError;

    /// Names are case-insensitive; `-` and `_` are interchangeable
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.name() == normalized)
            .ok_or_else(|| ConfigError::UnsupportedAlgorithm {
                name: s.to_string(),
                supported: Self::supported_names(),
            })
    }
}

impl TryFrom<String> for HashAlgorithm {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HashAlgorithm> for String {
    fn from(value: HashAlgorithm) -> Self {
        value.name().to_string()
    }
}

/// Reduce a big-endian unsigned integer modulo `modulus` without widening
/// past `u128`.
fn reduce_be(bytes: &[u8], modulus: usize) -> usize {
    let m = modulus as u128;
    let rem = bytes
        .iter()
        .fold(0u128, |acc, &b| ((acc << 8) | b as u128) % m);
    rem as usize
}

/// Ordered family of hash functions derived from validated algorithms
///
/// Serialized as the plain list of algorithm names. An empty list
/// deserializes to the default family, so the family is never empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<HashAlgorithm>", into = "Vec<HashAlgorithm>")]
pub struct HashFamily {
    algorithms: Vec<HashAlgorithm>,
}

impl HashFamily {
    /// Validate algorithm names into a family
    ///
    /// An empty list yields the single [`DEFAULT_ALGORITHM`].
    pub fn validate<S: AsRef<str>>(names: &[S]) -> Result<Self, ConfigError> {
        if names.is_empty() {
            return Ok(Self::default());
        }
        let algorithms = names
            .iter()
            .map(|n| n.as_ref().parse())
            .collect::<Result<Vec<HashAlgorithm>, _>>()?;
        Ok(Self { algorithms })
    }

    /// Build a family from already-typed algorithms
    ///
    /// An empty list yields the single [`DEFAULT_ALGORITHM`].
    pub fn from_algorithms(algorithms: Vec<HashAlgorithm>) -> Self {
        if algorithms.is_empty() {
            return Self::default();
        }
        Self { algorithms }
    }

    /// The configured algorithms, in order
    pub fn algorithms(&self) -> &[HashAlgorithm] {
        &self.algorithms
    }

    /// Algorithm used for a given round
    pub fn algorithm_for_round(&self, round: usize) -> HashAlgorithm {
        self.algorithms[round % self.algorithms.len()]
    }

    /// Index in `[0, capacity)` for `item` at hash round `round`
    ///
    /// # Panics
    /// Panics if `capacity` is 0.
    pub fn hash(&self, item: &[u8], round: usize, capacity: usize) -> usize {
        assert!(capacity > 0, "hash capacity must be positive");
        let salt = round.to_string();
        let digest = self
            .algorithm_for_round(round)
            .digest(&[item, salt.as_bytes()]);
        reduce_be(&digest, capacity)
    }

    /// Indices for rounds `0..rounds`, computed lazily
    pub fn positions<'a>(
        &'a self,
        item: &'a [u8],
        rounds: usize,
        capacity: usize,
    ) -> impl Iterator<Item = usize> + 'a {
        (0..rounds).map(move |round| self.hash(item, round, capacity))
    }
}

impl From<Vec<HashAlgorithm>> for HashFamily {
    fn from(algorithms: Vec<HashAlgorithm>) -> Self {
        Self::from_algorithms(algorithms)
    }
}

impl From<HashFamily> for Vec<HashAlgorithm> {
    fn from(family: HashFamily) -> Self {
        family.algorithms
    }
}

impl Default for HashFamily {
    fn default() -> Self {
        Self {
            algorithms: vec![DEFAULT_ALGORITHM],
        }
    }
}
