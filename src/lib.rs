//! Administration Session Module
//!
//! Bearer-token session management for the administration API.
//!
//! # Features
//!
//! - Password login and refresh-token grants against `{api_path}/oauth/token`
//! - Identity re-verification (`user-verified` scope) without touching the session
//! - Cookie persistence of the bearer record, with remember-me lifetimes
//! - Automatic refresh at the midpoint of the token lifetime
//! - Logout after 30 minutes of inactivity, with inactivity login hand-over
//! - Token-changed, logout and login listeners
//!
//! # Example
//!
//! ```rust,ignore
//! use admin_session::{session_config, LogoutOptions, ReqwestHttpTransport, SessionDependencies, SessionManager};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = session_config()
//!         .api_path("https://shop.example/api")
//!         .base_path("/admin")
//!         .build()?;
//!
//!     let transport = Arc::new(ReqwestHttpTransport::new()?);
//!     let manager = SessionManager::new(config, SessionDependencies::with_system_clock(transport));
//!
//!     manager.add_on_token_changed_listener(|auth| {
//!         tracing::info!(expiry = auth.expiry, "token changed");
//!     });
//!
//!     manager.login_by_username("admin", "shopware").await?;
//!     assert!(manager.is_logged_in().await);
//!
//!     manager.logout(LogoutOptions::user()).await;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `types`: grants, token endpoint payloads, configuration and routes
//! - `error`: error hierarchy with token endpoint error mapping
//! - `core`: collaborators (HTTP transport, clock, scheduler, activity, navigation)
//! - `flows`: credential exchange with the token endpoint
//! - `token`: storage, listeners and the session manager
//! - `builders`: fluent configuration builder
//! - `telemetry`: session metrics

pub mod builders;
pub mod core;
pub mod error;
pub mod flows;
pub mod telemetry;
pub mod token;
pub mod types;

// Re-export builders
pub use builders::{session_config, SessionConfigBuilder};

// Re-export errors
pub use error::{
    create_error_from_response, get_user_message, map_token_error, parse_error_response,
    ConfigurationError, NetworkError, ProtocolError, ProviderError, SessionError, SessionResult,
    StorageError, TokenError, TokenErrorResponse,
};

// Re-export types
pub use types::{
    // Auth
    AuthField, AuthObject, AuthValue, GrantType, ScopeParam, TokenRequest, TokenResponse,
    // Config
    Environment, SessionConfig, DEFAULT_CLIENT_ID, DEFAULT_REMEMBER_DURATION, DEFAULT_SCOPES,
    DEFAULT_TIMEOUT, INACTIVITY_THRESHOLD, STORAGE_KEY, TOKEN_ENDPOINT_PATH,
    // Navigation
    RouteInfo, RouteTarget, Snapshot, INACTIVITY_LOGIN_ROUTE, LOGIN_ROUTE,
};

// Re-export core components
pub use core::{
    // Transport
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, MockHttpTransport,
    ReqwestHttpTransport,
    // Clock
    Clock, MockClock, SystemClock,
    // Scheduler
    MockScheduler, ScheduledTask, Scheduler, TaskHandle, TokioScheduler,
    // Activity
    ActivityTracker, InMemoryActivityTracker,
    // Navigation
    MockNavigator, Navigator, SnapshotProvider,
};

// Re-export flows
pub use flows::{TokenExchange, TokenExchangeImpl};

// Re-export token management
pub use token::{
    // Storage
    CookieOptions, CookieStore, FileCookieStore, InMemoryCookieStore, InMemoryKeyValueStore,
    KeyValueStore, MockCookieStore, SameSite,
    // Listeners
    ListenerRegistry,
    // Manager
    LogoutOptions, SessionDependencies, SessionManager, SessionState,
};

// Re-export telemetry
pub use telemetry::{
    create_in_memory_metrics, no_op_metrics, InMemoryMetrics, NoOpMetrics, SessionMetrics,
};
