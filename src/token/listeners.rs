//! Session Listeners
//!
//! Append-only registries of token-changed, logout and login callbacks.

use parking_lot::RwLock;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::types::AuthObject;

/// Callback receiving the new grant after it was persisted.
pub type TokenChangedListener = Arc<dyn Fn(&AuthObject) + Send + Sync>;

/// Callback without arguments.
pub type SessionListener = Arc<dyn Fn() + Send + Sync>;

/// Listener registries.
///
/// Listeners run in registration order. A panicking listener is logged and
/// skipped; the remaining listeners still run.
#[derive(Default)]
pub struct ListenerRegistry {
    token_changed: RwLock<Vec<TokenChangedListener>>,
    logout: RwLock<Vec<SessionListener>>,
    login: RwLock<Vec<SessionListener>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_token_changed(&self, listener: TokenChangedListener) {
        self.token_changed.write().push(listener);
    }

    pub fn add_logout(&self, listener: SessionListener) {
        self.logout.write().push(listener);
    }

    pub fn add_login(&self, listener: SessionListener) {
        self.login.write().push(listener);
    }

    /// Notify token-changed listeners. Returns how many completed.
    pub fn notify_token_changed(&self, auth: &AuthObject) -> usize {
        let listeners = self.token_changed.read().clone();
        listeners
            .iter()
            .filter(|listener| invoke("token_changed", || listener(auth)))
            .count()
    }

    /// Notify logout listeners. Returns how many completed.
    pub fn notify_logout(&self) -> usize {
        let listeners = self.logout.read().clone();
        listeners
            .iter()
            .filter(|listener| invoke("logout", || listener()))
            .count()
    }

    /// Notify login listeners. Returns how many completed.
    pub fn notify_login(&self) -> usize {
        let listeners = self.login.read().clone();
        listeners
            .iter()
            .filter(|listener| invoke("login", || listener()))
            .count()
    }

    /// Registered (token-changed, logout, login) listener counts.
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.token_changed.read().len(),
            self.logout.read().len(),
            self.login.read().len(),
        )
    }
}

fn invoke(kind: &'static str, call: impl FnOnce()) -> bool {
    match catch_unwind(AssertUnwindSafe(call)) {
        Ok(()) => true,
        Err(_) => {
            tracing::error!(listener = kind, "session listener panicked");
            false
        }
    }
}
