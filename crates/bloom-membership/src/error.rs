//! Error types for the membership filter

use thiserror::Error;

/// Errors surfaced by the membership filter service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("Invalid filter configuration: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Membership filter is not initialized; configure it first")]
    Uninitialized,
}

impl FilterError {
    /// True for rejected `configure` input
    pub fn is_configuration(&self) -> bool {
        matches!(self, FilterError::Configuration(_))
    }

    /// True when `add`/`check` ran before any successful `configure`
    pub fn is_uninitialized(&self) -> bool {
        matches!(self, FilterError::Uninitialized)
    }
}

/// Reasons a filter configuration is rejected
///
/// Nothing is mutated when one of these is returned, so the caller may
/// retry with corrected input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("capacity must be greater than 0")]
    ZeroCapacity,

    #[error("expected_elements must be greater than 0")]
    ZeroExpectedElements,

    #[error("{field} must be positive, got {value}")]
    NegativeValue { field: &'static str, value: i64 },

    #[error("capacity {capacity} exceeds the maximum of {max} bits")]
    CapacityTooLarge { capacity: usize, max: usize },

    #[error("capacity/expected_elements ratio needs {rounds} hash rounds, more than the maximum of {max}")]
    TooManyHashRounds { rounds: usize, max: usize },

    #[error("hash algorithm '{name}' is not supported (available: {supported})")]
    UnsupportedAlgorithm { name: String, supported: String },
}
