//! Navigation
//!
//! Router and screen capture collaborators used when a session ends.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::SessionError;
use crate::types::{RouteInfo, RouteTarget, Snapshot};

/// Router interface.
pub trait Navigator: Send + Sync {
    /// Route currently displayed.
    fn current_route(&self) -> RouteInfo;

    /// Navigate to a named route.
    fn push(&self, target: RouteTarget);
}

/// Best-effort capture of the current screen.
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    /// Capture the current screen.
    async fn capture(&self) -> Result<Snapshot, SessionError>;
}

/// Mock navigator for testing.
pub struct MockNavigator {
    current: Mutex<RouteInfo>,
    pushes: Mutex<Vec<RouteTarget>>,
}

impl MockNavigator {
    /// Create a navigator sitting on `current`.
    pub fn new(current: RouteInfo) -> Self {
        Self {
            current: Mutex::new(current),
            pushes: Mutex::new(Vec::new()),
        }
    }

    /// Change the current route.
    pub fn set_current_route(&self, route: RouteInfo) {
        *self.current.lock() = route;
    }

    /// Every navigation requested so far.
    pub fn get_pushes(&self) -> Vec<RouteTarget> {
        self.pushes.lock().clone()
    }
}

impl Default for MockNavigator {
    fn default() -> Self {
        Self::new(RouteInfo::new("/", None))
    }
}

impl Navigator for MockNavigator {
    fn current_route(&self) -> RouteInfo {
        self.current.lock().clone()
    }

    fn push(&self, target: RouteTarget) {
        self.pushes.lock().push(target);
    }
}
