//! Response Messages

use serde::{Deserialize, Serialize};

use crate::domain::{FilterStatus, Membership};
use crate::error::{ConfigError, FilterError};

/// Response to a [`FilterRequest`](super::FilterRequest)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum FilterResponse {
    /// The filter was (re)initialized
    Configured {
        message: String,
        hash_round_count: usize,
    },
    /// The key was inserted
    Added { key: String, message: String },
    /// Query outcome
    Checked {
        key: String,
        membership: Membership,
        message: String,
    },
    /// Status of the active filter
    Status(FilterStatus),
    /// The request failed
    Error(ErrorResponse),
}

impl FilterResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, FilterResponse::Error(_))
    }
}

/// Error response
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable numeric code, see [`error_codes`]
    pub error_code: u32,
    /// The error's display text, verbatim
    pub error_message: String,
}

impl From<&FilterError> for ErrorResponse {
    fn from(error: &FilterError) -> Self {
        let error_code = match error {
            FilterError::Uninitialized => error_codes::UNINITIALIZED,
            FilterError::Configuration(ConfigError::UnsupportedAlgorithm { .. }) => {
                error_codes::UNSUPPORTED_ALGORITHM
            }
            FilterError::Configuration(_) => error_codes::INVALID_CONFIGURATION,
        };
        Self {
            error_code,
            error_message: error.to_string(),
        }
    }
}

/// Error codes for membership filter operations
pub mod error_codes {
    /// Non-positive or oversized capacity, or zero expected element count
    pub const INVALID_CONFIGURATION: u32 = 4001;
    /// Unknown digest algorithm name
    pub const UNSUPPORTED_ALGORITHM: u32 = 4002;
    /// add/check before any successful configure
    pub const UNINITIALIZED: u32 = 4003;
}
