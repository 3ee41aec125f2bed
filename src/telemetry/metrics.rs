//! Metrics
//!
//! Session lifecycle counters.

use parking_lot::Mutex;
use std::collections::BTreeMap;

/// Session metrics interface.
pub trait SessionMetrics: Send + Sync {
    /// Record a credential login attempt.
    fn record_login(&self, success: bool);

    /// Record a token refresh attempt.
    fn record_refresh(&self, success: bool);

    /// Record a logout.
    fn record_logout(&self, inactivity: bool);

    /// Record an error by code.
    fn record_error(&self, error_code: &str);
}

/// No-op metrics implementation.
pub struct NoOpMetrics;

impl SessionMetrics for NoOpMetrics {
    fn record_login(&self, _success: bool) {}
    fn record_refresh(&self, _success: bool) {}
    fn record_logout(&self, _inactivity: bool) {}
    fn record_error(&self, _error_code: &str) {}
}

/// No-op metrics singleton.
pub fn no_op_metrics() -> NoOpMetrics {
    NoOpMetrics
}

/// Counter metrics kept in memory, keyed by `name{label=value}`.
#[derive(Default)]
pub struct InMemoryMetrics {
    counters: Mutex<BTreeMap<String, u64>>,
}

impl InMemoryMetrics {
    /// Create new in-memory metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a counter.
    pub fn get(&self, key: &str) -> u64 {
        self.counters.lock().get(key).copied().unwrap_or(0)
    }

    /// Snapshot of every counter.
    pub fn snapshot(&self) -> BTreeMap<String, u64> {
        self.counters.lock().clone()
    }

    fn increment(&self, name: &str, label: &str, value: impl std::fmt::Display) {
        let key = format!("{}{{{}={}}}", name, label, value);
        *self.counters.lock().entry(key).or_insert(0) += 1;
    }
}

impl SessionMetrics for InMemoryMetrics {
    fn record_login(&self, success: bool) {
        self.increment("session_login_total", "success", success);
    }

    fn record_refresh(&self, success: bool) {
        self.increment("session_refresh_total", "success", success);
    }

    fn record_logout(&self, inactivity: bool) {
        self.increment("session_logout_total", "inactivity", inactivity);
    }

    fn record_error(&self, error_code: &str) {
        self.increment("session_errors_total", "code", error_code);
    }
}

/// Create in-memory metrics for testing.
pub fn create_in_memory_metrics() -> InMemoryMetrics {
    InMemoryMetrics::new()
}
