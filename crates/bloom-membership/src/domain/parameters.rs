//! Bloom filter parameter calculation
//!
//! Formulas:
//! - k = round((m/n) * ln(2))   -- optimal hash rounds, at least 1
//! - FPR = (1 - e^(-kn/m))^k    -- expected false positive rate

use std::f64::consts::LN_2;

/// Largest accepted bit count (just under 512 MiB of storage)
pub const MAX_CAPACITY: usize = u32::MAX as usize;

/// Largest accepted hash round count; each round is one digest per add/check
pub const MAX_HASH_ROUNDS: usize = 1024;

/// Optimal number of hash rounds for `m` bits and `n` expected elements
///
/// Never returns less than 1. `n == 0` is treated as a single round.
pub fn optimal_hash_rounds(m: usize, n: usize) -> usize {
    if n == 0 {
        return 1;
    }
    let k = ((m as f64 / n as f64) * LN_2).round() as usize;
    k.max(1)
}

/// False positive rate for `m` bits, `n` inserted elements and `k` rounds
///
/// Formula: FPR = (1 - e^(-kn/m))^k
pub fn calculate_fpr(m: usize, n: usize, k: usize) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * (n as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}

/// Estimated number of distinct insertions from the count of set bits
///
/// n ≈ -(m/k) * ln(1 - X/m). Returns `None` once every bit is set, since the
/// estimate is unbounded.
pub fn estimate_cardinality(m: usize, k: usize, bits_set: usize) -> Option<f64> {
    if m == 0 || k == 0 {
        return Some(0.0);
    }
    if bits_set >= m {
        return None;
    }
    let m = m as f64;
    Some(-(m / k as f64) * (1.0 - bits_set as f64 / m).ln())
}
