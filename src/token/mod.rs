//! Session Token Management
//!
//! Bearer credential persistence and the session lifecycle built on it.
//!
//! This module provides:
//!
//! - **Storage**: cookie jar for the bearer record, key/value stores for flags and markers
//! - **Listeners**: token-changed, logout and login callbacks
//! - **Manager**: login, refresh, verification, auto-refresh and inactivity logout

pub mod listeners;
pub mod manager;
pub mod storage;

// Storage
pub use storage::{
    CookieOptions, CookieStore, FileCookieStore, InMemoryCookieStore, InMemoryKeyValueStore,
    KeyValueStore, MockCookieStore, SameSite, StoredCookie,
};

// Listeners
pub use listeners::{ListenerRegistry, SessionListener, TokenChangedListener};

// Manager
pub use manager::{
    LogoutOptions, SessionDependencies, SessionManager, SessionState, INACTIVITY_BACKGROUND_PREFIX,
    LAST_KNOWN_USER_KEY, PREVIOUS_ROUTE_PREFIX, REDIRECT_FROM_LOGIN_KEY,
    REFRESH_AFTER_LOGOUT_KEY, REMEMBER_ME_KEY,
};
