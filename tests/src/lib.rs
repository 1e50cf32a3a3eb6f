//! # Bloom Membership Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Criterion benchmark bodies
//! │   └── membership_filter.rs
//! │
//! ├── integration/      # Cross-layer behaviour
//! │   ├── properties.rs     # no false negatives, idempotence, determinism, FPR
//! │   ├── concurrency.rs    # concurrent add/check/configure
//! │   └── request_flow.rs   # JSON requests through the handler
//! │
//! └── support.rs        # Shared fixtures and tracing setup
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p bloom-tests
//!
//! # By category
//! cargo test -p bloom-tests integration::properties
//! cargo test -p bloom-tests integration::concurrency
//!
//! # Benchmarks
//! cargo bench -p bloom-tests
//! ```
