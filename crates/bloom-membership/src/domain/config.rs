//! Membership filter configuration and validation
//!
//! # Example
//!
//! ```
//! use bloom_membership::domain::FilterConfigBuilder;
//!
//! let config = FilterConfigBuilder::new()
//!     .capacity(10_000)
//!     .expected_elements(1_000)
//!     .algorithm("sha256")
//!     .build()
//!     .expect("valid config");
//! assert_eq!(config.capacity, 10_000);
//! ```

use serde::{Deserialize, Serialize};

use super::hash_family::{HashFamily, DEFAULT_ALGORITHM};
use super::parameters::{optimal_hash_rounds, MAX_CAPACITY, MAX_HASH_ROUNDS};
use crate::error::ConfigError;

/// Filter configuration as supplied by the caller
///
/// Construction of a filter always goes through [`FilterConfig::validate`],
/// so an active filter never carries an unsupported algorithm, a zero size,
/// more than [`MAX_CAPACITY`] bits or more than [`MAX_HASH_ROUNDS`] rounds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Number of bits in storage (m)
    pub capacity: usize,
    /// Number of elements the false positive rate is tuned for (n)
    pub expected_elements: usize,
    /// Digest algorithm names; empty means the default algorithm
    #[serde(default)]
    pub algorithm_names: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            expected_elements: 100,
            algorithm_names: vec![DEFAULT_ALGORITHM.name().to_string()],
        }
    }
}

impl FilterConfig {
    /// Create a configuration and validate it
    pub fn new<S: Into<String>>(
        capacity: usize,
        expected_elements: usize,
        algorithm_names: impl IntoIterator<Item = S>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            capacity,
            expected_elements,
            algorithm_names: algorithm_names.into_iter().map(Into::into).collect(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate sizes and resolve algorithm names into a hash family
    pub fn validate(&self) -> Result<HashFamily, ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.expected_elements == 0 {
            return Err(ConfigError::ZeroExpectedElements);
        }
        if self.capacity > MAX_CAPACITY {
            return Err(ConfigError::CapacityTooLarge {
                capacity: self.capacity,
                max: MAX_CAPACITY,
            });
        }
        let rounds = optimal_hash_rounds(self.capacity, self.expected_elements);
        if rounds > MAX_HASH_ROUNDS {
            return Err(ConfigError::TooManyHashRounds {
                rounds,
                max: MAX_HASH_ROUNDS,
            });
        }
        HashFamily::validate(self.algorithm_names.as_slice())
    }

    /// Builder-style method to set the capacity
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Builder-style method to set the expected element count
    pub fn with_expected_elements(mut self, expected_elements: usize) -> Self {
        self.expected_elements = expected_elements;
        self
    }
}

/// Fluent builder for [`FilterConfig`]
///
/// Unset fields fall back to [`FilterConfig::default`]. Algorithms added
/// through [`algorithm`](Self::algorithm) replace the default list.
#[derive(Default)]
pub struct FilterConfigBuilder {
    capacity: Option<usize>,
    expected_elements: Option<usize>,
    algorithm_names: Vec<String>,
}

impl FilterConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of bits
    pub fn capacity(mut self, bits: usize) -> Self {
        self.capacity = Some(bits);
        self
    }

    /// Set the expected number of elements
    pub fn expected_elements(mut self, n: usize) -> Self {
        self.expected_elements = Some(n);
        self
    }

    /// Append a digest algorithm by name
    pub fn algorithm(mut self, name: impl Into<String>) -> Self {
        self.algorithm_names.push(name.into());
        self
    }

    /// Build the configuration, validating all parameters
    pub fn build(self) -> Result<FilterConfig, ConfigError> {
        let config = self.build_unchecked();
        config.validate()?;
        Ok(config)
    }

    /// Build without validation
    pub fn build_unchecked(self) -> FilterConfig {
        let defaults = FilterConfig::default();

        FilterConfig {
            capacity: self.capacity.unwrap_or(defaults.capacity),
            expected_elements: self.expected_elements.unwrap_or(defaults.expected_elements),
            algorithm_names: if self.algorithm_names.is_empty() {
                defaults.algorithm_names
            } else {
                self.algorithm_names
            },
        }
    }
}
