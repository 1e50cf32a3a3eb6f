//! Core membership filter
//!
//! INVARIANTS:
//! - capacity > 0, expected_elements > 0, hash_round_count >= 1
//! - every index produced by the hash family lies in [0, capacity)
//! - bits only ever go 0 -> 1; the storage length never changes
//! - no false negatives: after `add(x)`, `check(x)` is `PossiblyPresent`

use std::sync::atomic::{AtomicU64, Ordering};

use bitvec::prelude::*;
use serde::{Deserialize, Serialize};

use super::bit_storage::BitStorage;
use super::config::FilterConfig;
use super::hash_family::{HashAlgorithm, HashFamily};
use super::parameters::{
    calculate_fpr, estimate_cardinality, optimal_hash_rounds, MAX_CAPACITY, MAX_HASH_ROUNDS,
};
use crate::error::ConfigError;

/// Outcome of a membership query
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Membership {
    /// At least one probed bit is 0; the key was never added
    DefinitelyAbsent,
    /// Every probed bit is 1; the key was added or this is a false positive
    PossiblyPresent,
}

impl Membership {
    pub fn is_possibly_present(self) -> bool {
        matches!(self, Membership::PossiblyPresent)
    }

    pub fn is_definitely_absent(self) -> bool {
        matches!(self, Membership::DefinitelyAbsent)
    }
}

/// Point-in-time view of a filter's parameters and fill level
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterStatus {
    pub capacity: usize,
    pub expected_elements: usize,
    pub hash_round_count: usize,
    pub algorithms: Vec<HashAlgorithm>,
    pub bits_set: usize,
    pub fill_ratio: f64,
    pub keys_added: u64,
    /// Distinct keys estimated from the fill level; `None` once saturated
    pub estimated_keys: Option<f64>,
    /// (1 - e^(-k·n/m))^k for the configured n
    pub expected_fpr: f64,
    /// Same formula evaluated at the number of adds seen so far
    pub current_fpr: f64,
}

/// Probabilistic set of string keys with bounded memory
///
/// All operations take `&self`: bit flips are atomic, so adds and checks
/// may run concurrently against one instance.
#[derive(Debug)]
pub struct MembershipFilter {
    capacity: usize,
    expected_elements: usize,
    hash_round_count: usize,
    family: HashFamily,
    bits: BitStorage,
    keys_added: AtomicU64,
}

impl MembershipFilter {
    /// Build a fresh filter from a configuration
    pub fn configure(config: &FilterConfig) -> Result<Self, ConfigError> {
        let family = config.validate()?;
        Ok(Self::with_family(
            config.capacity,
            config.expected_elements,
            family,
        ))
    }

    /// Build a filter from an already-validated family
    ///
    /// # Panics
    /// Panics if `capacity` or `expected_elements` is 0, or if either size
    /// limit that [`FilterConfig::validate`] enforces is exceeded.
    pub fn with_family(capacity: usize, expected_elements: usize, family: HashFamily) -> Self {
        assert!(capacity > 0, "capacity must be positive");
        assert!(expected_elements > 0, "expected_elements must be positive");
        assert!(capacity <= MAX_CAPACITY, "capacity exceeds MAX_CAPACITY");
        let hash_round_count = optimal_hash_rounds(capacity, expected_elements);
        assert!(
            hash_round_count <= MAX_HASH_ROUNDS,
            "hash round count exceeds MAX_HASH_ROUNDS"
        );

        Self {
            capacity,
            expected_elements,
            hash_round_count,
            family,
            bits: BitStorage::new(capacity),
            keys_added: AtomicU64::new(0),
        }
    }

    /// Insert a key
    ///
    /// Afterwards `check(key)` is guaranteed to return `PossiblyPresent`.
    pub fn add(&self, key: &str) {
        for index in self.positions(key) {
            self.bits.set(index);
        }
        self.keys_added.fetch_add(1, Ordering::Relaxed);
    }

    /// Query a key, stopping at the first unset bit
    pub fn check(&self, key: &str) -> Membership {
        if self.positions(key).all(|index| self.bits.get(index)) {
            Membership::PossiblyPresent
        } else {
            Membership::DefinitelyAbsent
        }
    }

    /// Bit indices probed for `key`, one per hash round
    pub fn positions<'a>(&'a self, key: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.family
            .positions(key.as_bytes(), self.hash_round_count, self.capacity)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn expected_elements(&self) -> usize {
        self.expected_elements
    }

    /// Number of hash rounds (k) per add/check
    pub fn hash_round_count(&self) -> usize {
        self.hash_round_count
    }

    pub fn algorithms(&self) -> &[HashAlgorithm] {
        self.family.algorithms()
    }

    /// Number of `add` calls, duplicates included
    pub fn keys_added(&self) -> u64 {
        self.keys_added.load(Ordering::Relaxed)
    }

    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// Theoretical false positive rate at `expected_elements` insertions
    pub fn expected_false_positive_rate(&self) -> f64 {
        calculate_fpr(self.capacity, self.expected_elements, self.hash_round_count)
    }

    /// Copy of the current bits
    pub fn snapshot(&self) -> BitVec<u64, Lsb0> {
        self.bits.snapshot()
    }

    pub fn status(&self) -> FilterStatus {
        let bits_set = self.bits_set();
        let keys_added = self.keys_added();
        FilterStatus {
            capacity: self.capacity,
            expected_elements: self.expected_elements,
            hash_round_count: self.hash_round_count,
            algorithms: self.algorithms().to_vec(),
            bits_set,
            fill_ratio: bits_set as f64 / self.capacity as f64,
            keys_added,
            estimated_keys: estimate_cardinality(self.capacity, self.hash_round_count, bits_set),
            expected_fpr: self.expected_false_positive_rate(),
            current_fpr: calculate_fpr(self.capacity, keys_added as usize, self.hash_round_count),
        }
    }
}
