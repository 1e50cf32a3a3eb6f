//! Inbound Ports (Driving Ports)
//!
//! The API a transport layer calls to expose the filter remotely. Mapping
//! these operations onto a wire protocol, and errors onto status codes, is
//! the transport's concern.

use crate::domain::{FilterConfig, FilterStatus, Membership};
use crate::error::FilterError;

/// Primary membership filter API (Driving Port)
///
/// Implementations own exactly one active filter at a time. Every method is
/// CPU-bound and bounded by the number of hash rounds, so the trait is
/// synchronous.
pub trait MembershipFilterApi: Send + Sync {
    /// Replace the active filter with a fresh one built from `config`
    ///
    /// On error the previously active filter, if any, stays in place.
    fn configure(&self, config: &FilterConfig) -> Result<(), FilterError>;

    /// Insert a key into the active filter
    fn add(&self, key: &str) -> Result<(), FilterError>;

    /// Query a key against the active filter
    fn check(&self, key: &str) -> Result<Membership, FilterError>;

    /// Parameters and fill level of the active filter
    fn status(&self) -> Result<FilterStatus, FilterError>;

    /// Whether a filter has been configured
    fn is_configured(&self) -> bool;
}
