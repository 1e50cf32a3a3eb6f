//! Membership Filter Service
//!
//! Holds the single active filter behind a read-write lock. `configure`
//! takes the write lock only to swap in a fully built replacement; `add`,
//! `check` and `status` hold the read lock for their whole duration, so a
//! caller sees either the old instance or the new one, never a mix.

use std::sync::Arc;
use std::time::Instant;

use bitvec::prelude::*;
use parking_lot::RwLock;
use tracing::{debug, info, trace, warn};

use crate::domain::{FilterConfig, FilterStatus, Membership, MembershipFilter};
use crate::error::FilterError;
use crate::metrics::{MetricsRecorder, NoOpMetrics};
use crate::ports::MembershipFilterApi;

/// Explicitly owned handle to the active membership filter
///
/// Construct one at startup and share it (e.g. in an `Arc`) with every
/// request handler.
pub struct FilterService {
    active: RwLock<Option<Arc<MembershipFilter>>>,
    metrics: Arc<dyn MetricsRecorder>,
}

impl Default for FilterService {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterService {
    /// Create an unconfigured service without metrics
    pub fn new() -> Self {
        Self::with_metrics(Arc::new(NoOpMetrics))
    }

    /// Create an unconfigured service reporting to `metrics`
    pub fn with_metrics(metrics: Arc<dyn MetricsRecorder>) -> Self {
        Self {
            active: RwLock::new(None),
            metrics,
        }
    }

    /// Create a service with a filter already configured
    pub fn configured(config: &FilterConfig) -> Result<Self, FilterError> {
        let service = Self::new();
        service.configure(config)?;
        Ok(service)
    }

    /// Shared handle to the active filter, for diagnostics
    ///
    /// The handle stays valid after a later `configure`, but then refers to
    /// the replaced instance. Keys added through a stale handle never reach
    /// the active filter; route writes through [`MembershipFilterApi::add`].
    pub fn active_filter(&self) -> Result<Arc<MembershipFilter>, FilterError> {
        self.active
            .read()
            .as_ref()
            .cloned()
            .ok_or(FilterError::Uninitialized)
    }

    /// Copy of the active filter's bits
    pub fn snapshot(&self) -> Result<BitVec<u64, Lsb0>, FilterError> {
        self.with_active(|filter| filter.snapshot())
    }

    /// Run `op` against the active filter while holding the read lock
    fn with_active<R>(&self, op: impl FnOnce(&MembershipFilter) -> R) -> Result<R, FilterError> {
        let guard = self.active.read();
        match guard.as_deref() {
            Some(filter) => Ok(op(filter)),
            None => {
                self.metrics.record_uninitialized();
                warn!("Membership filter used before configuration");
                Err(FilterError::Uninitialized)
            }
        }
    }
}

impl MembershipFilterApi for FilterService {
    fn configure(&self, config: &FilterConfig) -> Result<(), FilterError> {
        // Build outside the lock; validation failures leave the old filter alone
        let filter = match MembershipFilter::configure(config) {
            Ok(filter) => filter,
            Err(e) => {
                self.metrics.record_configuration_rejected();
                warn!(
                    capacity = config.capacity,
                    expected_elements = config.expected_elements,
                    algorithms = ?config.algorithm_names,
                    error = %e,
                    "Rejected filter configuration"
                );
                return Err(e.into());
            }
        };

        let capacity = filter.capacity();
        let rounds = filter.hash_round_count();
        info!(
            capacity,
            expected_elements = filter.expected_elements(),
            hash_rounds = rounds,
            algorithms = ?filter.algorithms(),
            expected_fpr = filter.expected_false_positive_rate(),
            "Membership filter configured"
        );

        let previous = self.active.write().replace(Arc::new(filter));
        if let Some(old) = previous {
            info!(
                capacity = old.capacity(),
                keys_added = old.keys_added(),
                "Discarded previous membership filter"
            );
        }
        self.metrics.record_configured(capacity, rounds);
        Ok(())
    }

    fn add(&self, key: &str) -> Result<(), FilterError> {
        self.with_active(|filter| {
            let start = Instant::now();
            filter.add(key);
            self.metrics.record_add(start.elapsed());
            debug!(key, "Key added");
            trace!(positions = ?filter.positions(key).collect::<Vec<_>>(), "Bits set");
        })
    }

    fn check(&self, key: &str) -> Result<Membership, FilterError> {
        self.with_active(|filter| {
            let start = Instant::now();
            let membership = filter.check(key);
            self.metrics
                .record_check(start.elapsed(), membership.is_possibly_present());
            debug!(key, ?membership, "Key checked");
            membership
        })
    }

    fn status(&self) -> Result<FilterStatus, FilterError> {
        self.with_active(MembershipFilter::status)
    }

    fn is_configured(&self) -> bool {
        self.active.read().is_some()
    }
}
