//! Domain Layer - Pure business logic
//!
//! This layer contains:
//! - Hash function family over named digest algorithms
//! - Fixed-size bit storage
//! - Parameter calculations (optimal hash rounds, false positive rate)
//! - Configuration
//! - The membership filter itself
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - No locking beyond atomic bit flips

pub mod bit_storage;
pub mod config;
pub mod hash_family;
pub mod membership_filter;
pub mod parameters;

pub use bit_storage::BitStorage;
pub use config::{FilterConfig, FilterConfigBuilder};
pub use hash_family::{HashAlgorithm, HashFamily, DEFAULT_ALGORITHM};
pub use membership_filter::{FilterStatus, Membership, MembershipFilter};
pub use parameters::{
    calculate_fpr, estimate_cardinality, optimal_hash_rounds, MAX_CAPACITY, MAX_HASH_ROUNDS,
};
