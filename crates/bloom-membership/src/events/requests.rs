//! Request Messages

use serde::{Deserialize, Serialize};

use crate::domain::FilterConfig;
use crate::error::{ConfigError, FilterError};

/// Request to (re)initialize the filter
///
/// Sizes are signed because transports commonly deliver plain integers;
/// negative values are rejected as configuration errors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigureRequest {
    /// Number of bits
    #[serde(alias = "size")]
    pub capacity: i64,
    /// Number of elements the filter is tuned for
    #[serde(alias = "number_expected_elements")]
    pub expected_elements: i64,
    /// Digest algorithm names; empty selects the default
    #[serde(default, alias = "hash_function_names")]
    pub algorithm_names: Vec<String>,
}

impl ConfigureRequest {
    /// Convert into a [`FilterConfig`], rejecting negative sizes
    pub fn into_config(self) -> Result<FilterConfig, FilterError> {
        Ok(FilterConfig {
            capacity: non_negative("capacity", self.capacity)?,
            expected_elements: non_negative("expected_elements", self.expected_elements)?,
            algorithm_names: self.algorithm_names,
        })
    }
}

fn non_negative(field: &'static str, value: i64) -> Result<usize, ConfigError> {
    usize::try_from(value).map_err(|_| ConfigError::NegativeValue { field, value })
}

/// Request to insert a key
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddRequest {
    pub key: String,
}

/// Request to query a key
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRequest {
    pub key: String,
}

/// Any request the handler accepts
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum FilterRequest {
    #[serde(alias = "init")]
    Configure(ConfigureRequest),
    Add(AddRequest),
    Check(CheckRequest),
    Status,
}
