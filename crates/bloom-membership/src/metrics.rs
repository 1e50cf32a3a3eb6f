//! Metrics hooks for membership filter operations
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use bloom_membership::{FilterConfig, FilterService, Metrics, MembershipFilterApi};
//!
//! let metrics = Arc::new(Metrics::new());
//! let service = FilterService::with_metrics(metrics.clone());
//!
//! service.configure(&FilterConfig::default()).unwrap();
//! service.add("alice").unwrap();
//! service.check("alice").unwrap();
//!
//! let snapshot = metrics.snapshot();
//! assert_eq!(snapshot.keys_added, 1);
//! assert_eq!(snapshot.checks_possibly_present, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Thread-safe counters for filter operations
#[derive(Default)]
pub struct Metrics {
    /// Successful configure calls
    pub filters_configured: AtomicU64,
    /// Configure calls rejected with a configuration error
    pub configurations_rejected: AtomicU64,
    /// Keys added across all filter instances
    pub keys_added: AtomicU64,
    /// Checks performed
    pub checks_performed: AtomicU64,
    /// Checks answered `PossiblyPresent`
    pub checks_possibly_present: AtomicU64,
    /// add, check, status or snapshot calls made before any configure
    pub uninitialized_calls: AtomicU64,
    /// Bytes held by the active filter's bit storage
    pub bytes_allocated: AtomicU64,
    /// Cumulative add time in nanoseconds
    pub add_time_ns: AtomicU64,
    /// Cumulative check time in nanoseconds
    pub check_time_ns: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful configure
    ///
    /// The new filter's storage replaces whatever was allocated before.
    pub fn record_configured(&self, capacity: usize, _hash_round_count: usize) {
        self.filters_configured.fetch_add(1, Ordering::Relaxed);
        self.bytes_allocated
            .store(capacity.div_ceil(8) as u64, Ordering::Relaxed);
    }

    pub fn record_configuration_rejected(&self) {
        self.configurations_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_add(&self, duration: Duration) {
        self.keys_added.fetch_add(1, Ordering::Relaxed);
        self.add_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    /// Record a check and whether it answered `PossiblyPresent`
    pub fn record_check(&self, duration: Duration, possibly_present: bool) {
        self.checks_performed.fetch_add(1, Ordering::Relaxed);
        self.check_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
        if possibly_present {
            self.checks_possibly_present.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_uninitialized(&self) {
        self.uninitialized_calls.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            filters_configured: self.filters_configured.load(Ordering::Relaxed),
            configurations_rejected: self.configurations_rejected.load(Ordering::Relaxed),
            keys_added: self.keys_added.load(Ordering::Relaxed),
            checks_performed: self.checks_performed.load(Ordering::Relaxed),
            checks_possibly_present: self.checks_possibly_present.load(Ordering::Relaxed),
            uninitialized_calls: self.uninitialized_calls.load(Ordering::Relaxed),
            bytes_allocated: self.bytes_allocated.load(Ordering::Relaxed),
            avg_add_ns: self.avg_add_time_ns(),
            avg_check_ns: self.avg_check_time_ns(),
        }
    }

    pub fn avg_add_time_ns(&self) -> u64 {
        let total = self.add_time_ns.load(Ordering::Relaxed);
        let count = self.keys_added.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }

    pub fn avg_check_time_ns(&self) -> u64 {
        let total = self.check_time_ns.load(Ordering::Relaxed);
        let count = self.checks_performed.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }

    /// Ratio of `PossiblyPresent` answers to all checks
    ///
    /// Includes true positives as well as false positives.
    pub fn observed_positive_rate(&self) -> f64 {
        let total = self.checks_performed.load(Ordering::Relaxed);
        let positive = self.checks_possibly_present.load(Ordering::Relaxed);
        if total > 0 {
            positive as f64 / total as f64
        } else {
            0.0
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        self.filters_configured.store(0, Ordering::Relaxed);
        self.configurations_rejected.store(0, Ordering::Relaxed);
        self.keys_added.store(0, Ordering::Relaxed);
        self.checks_performed.store(0, Ordering::Relaxed);
        self.checks_possibly_present.store(0, Ordering::Relaxed);
        self.uninitialized_calls.store(0, Ordering::Relaxed);
        self.bytes_allocated.store(0, Ordering::Relaxed);
        self.add_time_ns.store(0, Ordering::Relaxed);
        self.check_time_ns.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub filters_configured: u64,
    pub configurations_rejected: u64,
    pub keys_added: u64,
    pub checks_performed: u64,
    pub checks_possibly_present: u64,
    pub uninitialized_calls: u64,
    pub bytes_allocated: u64,
    pub avg_add_ns: u64,
    pub avg_check_ns: u64,
}

/// Trait for custom metrics recording implementations
///
/// Implement this to forward to an external metrics system.
pub trait MetricsRecorder: Send + Sync {
    fn record_configured(&self, capacity: usize, hash_round_count: usize);

    fn record_configuration_rejected(&self);

    fn record_add(&self, duration: Duration);

    fn record_check(&self, duration: Duration, possibly_present: bool);

    fn record_uninitialized(&self);
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_configured(&self, _: usize, _: usize) {}
    fn record_configuration_rejected(&self) {}
    fn record_add(&self, _: Duration) {}
    fn record_check(&self, _: Duration, _: bool) {}
    fn record_uninitialized(&self) {}
}

impl MetricsRecorder for Metrics {
    fn record_configured(&self, capacity: usize, hash_round_count: usize) {
        Metrics::record_configured(self, capacity, hash_round_count);
    }

    fn record_configuration_rejected(&self) {
        Metrics::record_configuration_rejected(self);
    }

    fn record_add(&self, duration: Duration) {
        Metrics::record_add(self, duration);
    }

    fn record_check(&self, duration: Duration, possibly_present: bool) {
        Metrics::record_check(self, duration, possibly_present);
    }

    fn record_uninitialized(&self) {
        Metrics::record_uninitialized(self);
    }
}
