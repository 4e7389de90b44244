//! Thread-safe dispatch metrics
//!
//! Atomic counters tracking traffic through the engine: admissions,
//! settle-downs, rejections, dispatches, handler failures, and claimed
//! results. A snapshot is cheap and serializable for reporting.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global metrics collector instance
pub static METRICS: Lazy<DispatchMetrics> = Lazy::new(DispatchMetrics::new);

/// Get reference to global metrics collector
pub fn metrics() -> &'static DispatchMetrics {
    &METRICS
}

/// Counter set shared by every clerk in the process.
#[derive(Debug, Default)]
pub struct DispatchMetrics {
    requests_registered: AtomicU64,
    requests_settled: AtomicU64,
    requests_rejected: AtomicU64,
    dispatches_completed: AtomicU64,
    handler_failures: AtomicU64,
    results_claimed: AtomicU64,
}

impl DispatchMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_registered(&self) {
        self.requests_registered.fetch_add(1, Ordering::Relaxed);
    }

    /// A request placed below its wanted level.
    pub fn record_settled(&self) {
        self.requests_settled.fetch_add(1, Ordering::Relaxed);
    }

    /// A request rejected because every eligible lane was full.
    pub fn record_rejected(&self) {
        self.requests_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dispatched(&self) {
        self.dispatches_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_handler_failure(&self) {
        self.handler_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// A producer claimed a completed response or status.
    pub fn record_claimed(&self) {
        self.results_claimed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_registered: self.requests_registered.load(Ordering::Relaxed),
            requests_settled: self.requests_settled.load(Ordering::Relaxed),
            requests_rejected: self.requests_rejected.load(Ordering::Relaxed),
            dispatches_completed: self.dispatches_completed.load(Ordering::Relaxed),
            handler_failures: self.handler_failures.load(Ordering::Relaxed),
            results_claimed: self.results_claimed.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub requests_registered: u64,
    pub requests_settled: u64,
    pub requests_rejected: u64,
    pub dispatches_completed: u64,
    pub handler_failures: u64,
    pub results_claimed: u64,
}
