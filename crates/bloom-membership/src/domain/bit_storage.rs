//! Fixed-size bit storage
//!
//! Bits live in `AtomicU64` words so adds can run through a shared
//! reference: setting a bit is a single `fetch_or`, which is commutative and
//! idempotent. The length is fixed at construction.
//!
//! An index outside `[0, len)` is a defect in the caller and panics.

use std::sync::atomic::{AtomicU64, Ordering};

use bitvec::prelude::*;

const WORD_BITS: usize = u64::BITS as usize;

/// Dense, never-resized array of single-bit flags, all initially 0
#[derive(Debug)]
pub struct BitStorage {
    words: Box<[AtomicU64]>,
    len: usize,
}

impl BitStorage {
    /// Create storage for `len` bits, all cleared
    pub fn new(len: usize) -> Self {
        let words = (0..len.div_ceil(WORD_BITS))
            .map(|_| AtomicU64::new(0))
            .collect();
        Self { words, len }
    }

    /// Number of bits
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    fn locate(&self, index: usize) -> (usize, u64) {
        assert!(
            index < self.len,
            "bit index {} out of range for storage of {} bits",
            index,
            self.len
        );
        (index / WORD_BITS, 1u64 << (index % WORD_BITS))
    }

    /// Set the bit at `index` to 1
    ///
    /// Returns `true` if the bit was previously 0.
    pub fn set(&self, index: usize) -> bool {
        let (word, mask) = self.locate(index);
        let previous = self.words[word].fetch_or(mask, Ordering::AcqRel);
        previous & mask == 0
    }

    /// Read the bit at `index`
    pub fn get(&self, index: usize) -> bool {
        let (word, mask) = self.locate(index);
        self.words[word].load(Ordering::Acquire) & mask != 0
    }

    /// Number of bits set to 1
    pub fn count_ones(&self) -> usize {
        self.words
            .iter()
            .map(|w| w.load(Ordering::Relaxed).count_ones() as usize)
            .sum()
    }

    /// Point-in-time copy of the bits
    pub fn snapshot(&self) -> BitVec<u64, Lsb0> {
        let raw: Vec<u64> = self
            .words
            .iter()
            .map(|w| w.load(Ordering::Acquire))
            .collect();
        let mut bits = BitVec::<u64, Lsb0>::from_vec(raw);
        bits.truncate(self.len);
        bits
    }
}
