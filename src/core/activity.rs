//! User Activity
//!
//! Tracks the timestamp of the last user interaction.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use crate::core::Clock;

/// User activity tracker interface.
pub trait ActivityTracker: Send + Sync {
    /// Epoch milliseconds of the last recorded interaction.
    fn last_activity(&self) -> i64;

    /// Record an interaction now.
    fn update_last_activity(&self);
}

/// In-memory activity tracker.
pub struct InMemoryActivityTracker {
    clock: Arc<dyn Clock>,
    last_activity: AtomicI64,
}

impl InMemoryActivityTracker {
    /// Create a tracker whose last activity is the current time.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let now = clock.now_ms();
        Self {
            clock,
            last_activity: AtomicI64::new(now),
        }
    }

    /// Overwrite the last activity timestamp.
    pub fn set_last_activity(&self, timestamp_ms: i64) {
        self.last_activity.store(timestamp_ms, Ordering::SeqCst);
    }
}

impl ActivityTracker for InMemoryActivityTracker {
    fn last_activity(&self) -> i64 {
        self.last_activity.load(Ordering::SeqCst)
    }

    fn update_last_activity(&self) {
        self.last_activity
            .store(self.clock.now_ms(), Ordering::SeqCst);
    }
}
