//! # Bloom Membership
//!
//! Approximate set-membership testing for string keys with bounded memory.
//! A query answers either "definitely absent" or "possibly present"; keys that
//! were added are never reported absent.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `HashFamily`: k hash functions from a few named digest algorithms,
//!     salted by round index
//!   - `BitStorage`: fixed-size atomic bit array
//!   - `MembershipFilter`: optimal round count, `add` and `check`
//!   - `FilterConfig`: configuration with validation
//!
//! - **Ports Layer** (`ports/`): `MembershipFilterApi`, the driving port
//!
//! - **Service Layer** (`service/`): `FilterService` owns the active filter
//!   and swaps it atomically on reconfiguration
//!
//! - **Events Layer** (`events/`): request and response messages
//!
//! - **Handler Layer** (`handler/`): `FilterRequestHandler` maps requests to
//!   the service and errors to coded responses
//!
//! ## Invariants
//!
//! - **No false negatives**: after `add(x)`, `check(x)` is `PossiblyPresent`
//! - **Determinism**: identical configurations and adds give identical bits
//! - FPR ≈ (1 - e^(-kn/m))^k with k = round((m/n) * ln 2)
//!
//! ## Usage Example
//!
//! ```
//! use bloom_membership::{FilterConfig, FilterService, Membership, MembershipFilterApi};
//!
//! let service = FilterService::new();
//! service
//!     .configure(&FilterConfig::new(1000, 100, ["sha256"]).unwrap())
//!     .unwrap();
//!
//! service.add("alice").unwrap();
//! assert_eq!(service.check("alice").unwrap(), Membership::PossiblyPresent);
//! assert_eq!(service.status().unwrap().hash_round_count, 7);
//! ```

pub mod domain;
pub mod error;
pub mod events;
pub mod handler;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use domain::{
    BitStorage, FilterConfig, FilterConfigBuilder, FilterStatus, HashAlgorithm, HashFamily,
    Membership, MembershipFilter,
};
pub use error::{ConfigError, FilterError};
pub use events::{FilterRequest, FilterResponse};
pub use handler::FilterRequestHandler;
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
pub use ports::MembershipFilterApi;
pub use service::FilterService;
