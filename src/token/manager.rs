//! Session Manager
//!
//! Bearer session lifecycle: credential login, refresh, identity
//! verification, cookie persistence, midpoint auto-refresh, inactivity logout
//! and listener notification.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use crate::core::{
    ActivityTracker, Clock, HttpTransport, InMemoryActivityTracker, Navigator, ScheduledTask,
    Scheduler, SnapshotProvider, SystemClock, TaskHandle, TokioScheduler,
};
use crate::error::{ConfigurationError, SessionError, SessionResult, TokenError};
use crate::flows::{TokenExchange, TokenExchangeImpl};
use crate::telemetry::{NoOpMetrics, SessionMetrics};
use crate::token::listeners::ListenerRegistry;
use crate::token::storage::{
    CookieOptions, CookieStore, InMemoryCookieStore, InMemoryKeyValueStore, KeyValueStore,
};
use crate::types::{
    AuthField, AuthObject, AuthValue, RouteTarget, SessionConfig, INACTIVITY_LOGIN_ROUTE,
    INACTIVITY_THRESHOLD, LOGIN_ROUTE, STORAGE_KEY,
};

/// Local store key of the remember-me flag.
pub const REMEMBER_ME_KEY: &str = "rememberMe";
/// Session store marker set by a credential login.
pub const REDIRECT_FROM_LOGIN_KEY: &str = "redirectFromLogin";
/// Session store key prefix of the route active at logout.
pub const PREVIOUS_ROUTE_PREFIX: &str = "sw-admin-previous-route_";
/// Session store key prefix of the inactivity background snapshot.
pub const INACTIVITY_BACKGROUND_PREFIX: &str = "inactivityBackground_";
/// Session store key of the user signed out by inactivity.
pub const LAST_KNOWN_USER_KEY: &str = "lastKnownUser";
/// Session store marker set by a regular logout.
pub const REFRESH_AFTER_LOGOUT_KEY: &str = "refresh-after-logout";

/// Coarse session state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn,
}

/// Logout options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogoutOptions {
    /// Logout caused by user inactivity.
    pub inactivity: bool,
    /// Send an inactivity logout to the inactivity login screen.
    pub redirect: bool,
}

impl LogoutOptions {
    /// Logout requested by the user.
    pub fn user() -> Self {
        Self::default()
    }

    /// Logout caused by inactivity, redirecting to the inactivity login.
    pub fn inactivity() -> Self {
        Self {
            inactivity: true,
            redirect: true,
        }
    }

    pub fn without_redirect(mut self) -> Self {
        self.redirect = false;
        self
    }
}

impl Default for LogoutOptions {
    fn default() -> Self {
        Self {
            inactivity: false,
            redirect: true,
        }
    }
}

/// Collaborators of a [`SessionManager`].
#[derive(Clone)]
pub struct SessionDependencies {
    pub transport: Arc<dyn HttpTransport>,
    pub cookies: Arc<dyn CookieStore>,
    pub local_storage: Arc<dyn KeyValueStore>,
    pub session_storage: Arc<dyn KeyValueStore>,
    pub activity: Arc<dyn ActivityTracker>,
    pub clock: Arc<dyn Clock>,
    pub scheduler: Arc<dyn Scheduler>,
    pub navigator: Option<Arc<dyn Navigator>>,
    pub snapshots: Option<Arc<dyn SnapshotProvider>>,
    pub metrics: Arc<dyn SessionMetrics>,
}

impl SessionDependencies {
    /// In-memory stores and activity tracking driven by `clock`, a tokio
    /// scheduler, no navigation and no metrics.
    pub fn new(transport: Arc<dyn HttpTransport>, clock: Arc<dyn Clock>) -> Self {
        Self {
            transport,
            cookies: Arc::new(InMemoryCookieStore::new(Arc::clone(&clock))),
            local_storage: Arc::new(InMemoryKeyValueStore::new()),
            session_storage: Arc::new(InMemoryKeyValueStore::new()),
            activity: Arc::new(InMemoryActivityTracker::new(Arc::clone(&clock))),
            clock,
            scheduler: Arc::new(TokioScheduler::new()),
            navigator: None,
            snapshots: None,
            metrics: Arc::new(NoOpMetrics),
        }
    }

    /// Same as [`SessionDependencies::new`] on the system clock.
    pub fn with_system_clock(transport: Arc<dyn HttpTransport>) -> Self {
        Self::new(transport, Arc::new(SystemClock))
    }

    pub fn with_cookie_store(mut self, cookies: Arc<dyn CookieStore>) -> Self {
        self.cookies = cookies;
        self
    }

    pub fn with_local_storage(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.local_storage = store;
        self
    }

    pub fn with_session_storage(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.session_storage = store;
        self
    }

    pub fn with_activity_tracker(mut self, activity: Arc<dyn ActivityTracker>) -> Self {
        self.activity = activity;
        self
    }

    pub fn with_scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = scheduler;
        self
    }

    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn with_snapshot_provider(mut self, provider: Arc<dyn SnapshotProvider>) -> Self {
        self.snapshots = Some(provider);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn SessionMetrics>) -> Self {
        self.metrics = metrics;
        self
    }
}

#[derive(Default)]
struct ManagerState {
    /// Username of the last credential login.
    current_user: Option<String>,
    pending_refresh: Option<TaskHandle>,
    /// Bumped on every (re)schedule and cancel; a timer only acts if its
    /// generation is still current.
    refresh_generation: u64,
}

/// Session token manager.
///
/// Shared as `Arc<SessionManager>`. The auto-refresh timer only holds a weak
/// reference, so dropping the last handle stops it from acting.
pub struct SessionManager {
    config: SessionConfig,
    exchange: TokenExchangeImpl,
    deps: SessionDependencies,
    listeners: ListenerRegistry,
    state: Mutex<ManagerState>,
    inactivity_logout_in_progress: AtomicBool,
    weak_self: Weak<SessionManager>,
}

impl SessionManager {
    /// Create new session manager.
    pub fn new(config: SessionConfig, deps: SessionDependencies) -> Arc<Self> {
        let exchange = TokenExchangeImpl::new(config.clone(), Arc::clone(&deps.transport));

        Arc::new_cyclic(|weak_self| Self {
            config,
            exchange,
            deps,
            listeners: ListenerRegistry::new(),
            state: Mutex::new(ManagerState::default()),
            inactivity_logout_in_progress: AtomicBool::new(false),
            weak_self: weak_self.clone(),
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Log in with username and password and persist the new session.
    pub async fn login_by_username(
        &self,
        username: &str,
        password: &str,
    ) -> SessionResult<AuthObject> {
        validate_credentials(username, password)?;

        let request = self.exchange.password_request(username, password);
        let response = match self.exchange.exchange(request).await {
            Ok(response) => response,
            Err(e) => {
                self.deps.metrics.record_login(false);
                self.deps.metrics.record_error(e.error_code());
                tracing::warn!(error = %e, "login failed");
                return Err(e);
            }
        };

        self.deps.activity.update_last_activity();
        let auth = self.set_bearer_authentication(AuthObject::from_response(&response))?;
        self.deps
            .session_storage
            .set(REDIRECT_FROM_LOGIN_KEY, "true");
        self.state.lock().current_user = Some(username.to_string());
        self.inactivity_logout_in_progress
            .store(false, Ordering::SeqCst);

        self.deps.metrics.record_login(true);
        tracing::info!(expiry = auth.expiry, "logged in");

        Ok(auth)
    }

    /// Exchange the stored refresh token for a new grant.
    ///
    /// Returns the new access token.
    pub async fn refresh_token(&self) -> SessionResult<String> {
        let refresh_token = self
            .refresh_token_value()
            .ok_or(SessionError::Token(TokenError::NoRefreshToken))?;

        let request = self.exchange.refresh_request(&refresh_token);
        let response = match self.exchange.exchange(request).await {
            Ok(response) => response,
            Err(e) => {
                self.deps.metrics.record_refresh(false);
                self.deps.metrics.record_error(e.error_code());
                return Err(e);
            }
        };

        let mut auth = AuthObject::from_response(&response);
        if auth.refresh.is_empty() {
            // Endpoint did not rotate the refresh token.
            auth.refresh = refresh_token;
        }
        self.set_bearer_authentication(auth)?;

        self.deps.metrics.record_refresh(true);
        tracing::debug!("token refreshed");

        Ok(response.access_token)
    }

    /// Confirm a user's identity without touching the session.
    ///
    /// The returned grant carries the relative expiry from the endpoint.
    pub async fn verify_user_by_username(
        &self,
        username: &str,
        password: &str,
    ) -> SessionResult<AuthObject> {
        validate_credentials(username, password)?;

        let request = self.exchange.verification_request(username, password);
        let response = self.exchange.exchange(request).await?;

        tracing::debug!("user verified");
        Ok(AuthObject::from_response(&response))
    }

    /// Re-verify the user of the last credential login.
    ///
    /// Returns the verification access token.
    pub async fn verify_user_token(&self, password: &str) -> SessionResult<String> {
        let username = self
            .state
            .lock()
            .current_user
            .clone()
            .ok_or(SessionError::Token(TokenError::NoCurrentUser))?;

        let verified = self.verify_user_by_username(&username, password).await?;
        if verified.access.is_empty() {
            return Err(SessionError::Token(TokenError::InvalidToken {
                message: "verification returned no access token".to_string(),
            }));
        }

        Ok(verified.access)
    }

    /// Persist a grant whose `expiry` is seconds from now.
    ///
    /// Returns the grant with its absolute expiry in epoch milliseconds.
    pub fn set_bearer_authentication(&self, auth: AuthObject) -> SessionResult<AuthObject> {
        let now = self.deps.clock.now_ms();
        let expiry = now.saturating_add(auth.expiry.saturating_mul(1000));
        let auth = AuthObject { expiry, ..auth };

        let cookie_expiry = if self.should_consider_user_activity() {
            expiry
        } else {
            now.saturating_add(duration_ms(self.config.remember_duration()))
        };
        let options = CookieOptions::scoped(self.config.cookie_path(), self.config.cookie_secure)
            .expires_at_ms(cookie_expiry);

        self.deps
            .cookies
            .set_item(STORAGE_KEY, &auth.to_json()?, options)?;

        if self.token().is_some() {
            self.listeners.notify_token_changed(&auth);
        }

        self.restart_auto_token_refresh(expiry);

        Ok(auth)
    }

    /// Cancel any pending auto-refresh and schedule one at the midpoint
    /// between now and `expiry_ms`.
    pub fn restart_auto_token_refresh(&self, expiry_ms: i64) {
        let delay_ms = (expiry_ms.saturating_sub(self.deps.clock.now_ms()) / 2).max(0) as u64;

        let mut state = self.state.lock();
        if let Some(handle) = state.pending_refresh.take() {
            self.deps.scheduler.cancel(handle);
        }
        state.refresh_generation += 1;

        let task = auto_refresh_task(self.weak_self.clone(), state.refresh_generation);
        state.pending_refresh = Some(
            self.deps
                .scheduler
                .schedule(Duration::from_millis(delay_ms), task),
        );

        tracing::debug!(delay_ms, "auto refresh scheduled");
    }

    async fn run_auto_refresh(&self, generation: u64) {
        {
            let mut state = self.state.lock();
            if state.refresh_generation != generation {
                return;
            }
            state.pending_refresh = None;
        }

        if self.should_consider_user_activity() && self.last_activity_over_threshold() {
            tracing::info!("inactivity threshold reached, logging out");
            self.logout(LogoutOptions::inactivity()).await;
            return;
        }

        if let Err(e) = self.refresh_token().await {
            tracing::warn!(error = %e, "automatic token refresh failed");
        }
    }

    /// Whether inactivity expires the session: neither a development
    /// environment nor remember-me.
    pub fn should_consider_user_activity(&self) -> bool {
        !self.config.environment.is_development() && !self.remember_me()
    }

    pub fn last_activity_over_threshold(&self) -> bool {
        let threshold = self
            .deps
            .clock
            .now_ms()
            .saturating_sub(duration_ms(INACTIVITY_THRESHOLD));
        self.deps.activity.last_activity() <= threshold
    }

    /// Read the persisted grant. Missing or malformed records read as `None`.
    pub fn bearer_authentication(&self) -> Option<AuthObject> {
        self.deps
            .cookies
            .get_item(STORAGE_KEY)
            .and_then(|raw| AuthObject::from_json(&raw))
    }

    pub fn bearer_field(&self, field: AuthField) -> Option<AuthValue> {
        self.bearer_authentication()
            .and_then(|auth| auth.field(field))
    }

    /// Current access token.
    pub fn token(&self) -> Option<String> {
        self.bearer_field(AuthField::Access)
            .and_then(|value| value.as_token().map(str::to_string))
    }

    /// Current refresh token.
    pub fn refresh_token_value(&self) -> Option<String> {
        self.bearer_field(AuthField::Refresh)
            .and_then(|value| value.as_token().map(str::to_string))
    }

    /// End the session and hand over to the login screens. Always `true`.
    pub async fn logout(&self, options: LogoutOptions) -> bool {
        if let Err(e) = self.deps.cookies.remove_item(STORAGE_KEY) {
            tracing::warn!(error = %e, "failed to remove bearer cookie");
        }

        let last_user = {
            let mut state = self.state.lock();
            if let Some(handle) = state.pending_refresh.take() {
                self.deps.scheduler.cancel(handle);
            }
            state.refresh_generation += 1;
            state.current_user.take()
        };

        self.set_remember_me(false);
        self.deps.metrics.record_logout(options.inactivity);
        tracing::info!(inactivity = options.inactivity, "logged out");

        self.forward_logout(options, last_user).await;
        true
    }

    async fn forward_logout(&self, options: LogoutOptions, last_user: Option<String>) {
        self.listeners.notify_logout();

        let Some(navigator) = self.deps.navigator.clone() else {
            return;
        };

        let id = create_id();
        let session = &self.deps.session_storage;

        match serde_json::to_string(&navigator.current_route()) {
            Ok(route) => session.set(&format!("{PREVIOUS_ROUTE_PREFIX}{id}"), &route),
            Err(e) => tracing::warn!(error = %e, "failed to store previous route"),
        }

        if options.inactivity && options.redirect {
            if self
                .inactivity_logout_in_progress
                .swap(true, Ordering::SeqCst)
            {
                tracing::debug!("inactivity logout already in progress");
                return;
            }

            if let Some(provider) = &self.deps.snapshots {
                match provider.capture().await {
                    Ok(snapshot) => session.set(
                        &format!("{INACTIVITY_BACKGROUND_PREFIX}{id}"),
                        &snapshot.to_data_url(),
                    ),
                    Err(e) => tracing::debug!(error = %e, "snapshot capture failed"),
                }
            }

            if let Some(user) = last_user {
                session.set(LAST_KNOWN_USER_KEY, &user);
            }

            navigator.push(RouteTarget::named(INACTIVITY_LOGIN_ROUTE).with_param("id", id));
        } else {
            session.set(REFRESH_AFTER_LOGOUT_KEY, "true");
            navigator.push(RouteTarget::named(LOGIN_ROUTE));
        }
    }

    /// Allow the next inactivity logout to redirect again.
    pub fn reset_inactivity_logout(&self) {
        self.inactivity_logout_in_progress
            .store(false, Ordering::SeqCst);
    }

    /// Fire login listeners once after a credential login.
    ///
    /// Returns the number of listeners that completed, or `None` if no login
    /// happened since the last call.
    pub fn notify_on_login_listener(&self) -> Option<usize> {
        self.deps.session_storage.get(REDIRECT_FROM_LOGIN_KEY)?;
        self.deps.session_storage.remove(REDIRECT_FROM_LOGIN_KEY);

        Some(self.listeners.notify_login())
    }

    /// Whether a session token exists. A stale session is logged out first.
    pub async fn is_logged_in(&self) -> bool {
        let token_exists = self.token().is_some();

        if token_exists
            && self.should_consider_user_activity()
            && self.last_activity_over_threshold()
        {
            self.logout(LogoutOptions::inactivity().without_redirect())
                .await;
            return false;
        }

        token_exists
    }

    pub fn state(&self) -> SessionState {
        if self.token().is_some() {
            SessionState::LoggedIn
        } else {
            SessionState::LoggedOut
        }
    }

    pub fn add_on_token_changed_listener<F>(&self, listener: F)
    where
        F: Fn(&AuthObject) + Send + Sync + 'static,
    {
        self.listeners.add_token_changed(Arc::new(listener));
    }

    pub fn add_on_logout_listener<F>(&self, listener: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.listeners.add_logout(Arc::new(listener));
    }

    pub fn add_on_login_listener<F>(&self, listener: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.listeners.add_login(Arc::new(listener));
    }

    pub fn storage_key(&self) -> &'static str {
        STORAGE_KEY
    }

    pub fn storage(&self) -> Arc<dyn CookieStore> {
        Arc::clone(&self.deps.cookies)
    }

    pub fn remember_me(&self) -> bool {
        self.deps.local_storage.get(REMEMBER_ME_KEY).is_some()
    }

    pub fn set_remember_me(&self, active: bool) {
        if active {
            self.deps.local_storage.set(REMEMBER_ME_KEY, "true");
        } else {
            self.deps.local_storage.remove(REMEMBER_ME_KEY);
        }
    }
}

fn auto_refresh_task(manager: Weak<SessionManager>, generation: u64) -> ScheduledTask {
    Box::pin(async move {
        if let Some(manager) = manager.upgrade() {
            manager.run_auto_refresh(generation).await;
        }
    })
}

fn validate_credentials(username: &str, password: &str) -> SessionResult<()> {
    if username.is_empty() || password.is_empty() {
        return Err(SessionError::Configuration(
            ConfigurationError::InvalidCredentials {
                message: "username and password must not be empty".to_string(),
            },
        ));
    }
    Ok(())
}

fn duration_ms(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}

/// 32 lowercase hex characters.
fn create_id() -> String {
    format!("{:032x}", rand::random::<u128>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MockClock, MockHttpTransport, MockScheduler};
    use crate::types::Environment;

    const NOW: i64 = 1_700_000_000_000;

    struct Fixture {
        manager: Arc<SessionManager>,
        transport: Arc<MockHttpTransport>,
        scheduler: Arc<MockScheduler>,
        clock: Arc<MockClock>,
    }

    fn fixture(environment: Environment) -> Fixture {
        let transport = Arc::new(MockHttpTransport::new());
        let scheduler = Arc::new(MockScheduler::new());
        let clock = Arc::new(MockClock::new(NOW));
        let config = SessionConfig::builder()
            .api_path("https://shop.example/api")
            .environment(environment)
            .build()
            .unwrap();
        let deps = SessionDependencies::new(transport.clone(), clock.clone())
            .with_scheduler(scheduler.clone());

        Fixture {
            manager: SessionManager::new(config, deps),
            transport,
            scheduler,
            clock,
        }
    }

    #[tokio::test]
    async fn test_login_rejects_empty_credentials() {
        let f = fixture(Environment::Production);

        let result = f.manager.login_by_username("", "secret").await;

        assert!(matches!(
            result,
            Err(SessionError::Configuration(
                ConfigurationError::InvalidCredentials { .. }
            ))
        ));
        assert_eq!(f.transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_login_failure_leaves_session_untouched() {
        let f = fixture(Environment::Production);
        f.transport
            .queue_json_response(400, &serde_json::json!({"error": "invalid_grant"}));

        let result = f.manager.login_by_username("admin", "wrong").await;

        assert!(result.is_err());
        assert_eq!(f.manager.state(), SessionState::LoggedOut);
        assert_eq!(f.scheduler.schedule_count(), 0);
    }

    #[tokio::test]
    async fn test_refresh_keeps_refresh_token_when_not_rotated() {
        let f = fixture(Environment::Production);
        f.transport.queue_token_response("a1", "r1", 600);
        f.manager.login_by_username("admin", "shopware").await.unwrap();

        f.transport.queue_token_response("a2", "", 600);
        let access = f.manager.refresh_token().await.unwrap();

        assert_eq!(access, "a2");
        assert_eq!(f.manager.refresh_token_value().as_deref(), Some("r1"));
    }

    #[tokio::test]
    async fn test_development_environment_ignores_activity() {
        let f = fixture(Environment::Development);
        assert!(!f.manager.should_consider_user_activity());

        f.transport.queue_token_response("a", "r", 600);
        f.manager.login_by_username("admin", "shopware").await.unwrap();
        f.clock.advance(Duration::from_secs(3600));

        // Remember-me cookie lifetime keeps the record alive past the token expiry.
        assert!(f.manager.is_logged_in().await);
    }

    #[tokio::test]
    async fn test_verify_user_token_requires_login() {
        let f = fixture(Environment::Production);

        let result = f.manager.verify_user_token("shopware").await;

        assert!(matches!(
            result,
            Err(SessionError::Token(TokenError::NoCurrentUser))
        ));
    }

    #[tokio::test]
    async fn test_verify_user_token_uses_current_user() {
        let f = fixture(Environment::Production);
        f.transport.queue_token_response("a", "r", 600);
        f.manager.login_by_username("admin", "shopware").await.unwrap();

        f.transport.queue_token_response("verified", "", 600);
        let token = f.manager.verify_user_token("shopware").await.unwrap();

        assert_eq!(token, "verified");
        let body = f.transport.get_last_request().unwrap().json_body().unwrap();
        assert_eq!(body["username"], "admin");
        assert_eq!(body["scope"], "user-verified");
    }

    #[tokio::test]
    async fn test_verify_user_token_rejects_empty_access() {
        let f = fixture(Environment::Production);
        f.transport.queue_token_response("a", "r", 600);
        f.manager.login_by_username("admin", "shopware").await.unwrap();

        f.transport.queue_token_response("", "", 600);
        let result = f.manager.verify_user_token("shopware").await;

        assert!(matches!(
            result,
            Err(SessionError::Token(TokenError::InvalidToken { .. }))
        ));
    }

    #[tokio::test]
    async fn test_logout_clears_current_user_and_timer() {
        let f = fixture(Environment::Production);
        f.transport.queue_token_response("a", "r", 600);
        f.manager.login_by_username("admin", "shopware").await.unwrap();

        assert!(f.manager.logout(LogoutOptions::user()).await);

        assert!(f.scheduler.pending_delays().is_empty());
        assert!(f.manager.bearer_authentication().is_none());
        assert!(matches!(
            f.manager.verify_user_token("shopware").await,
            Err(SessionError::Token(TokenError::NoCurrentUser))
        ));
    }

    #[tokio::test]
    async fn test_stale_timer_does_nothing_after_logout() {
        let f = fixture(Environment::Production);
        f.transport.queue_token_response("a", "r", 600);
        f.manager.login_by_username("admin", "shopware").await.unwrap();
        f.manager.logout(LogoutOptions::user()).await;

        assert_eq!(f.scheduler.fire_pending().await, 0);
        assert_eq!(f.transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_dropped_manager_timer_is_inert() {
        let f = fixture(Environment::Production);
        f.transport.queue_token_response("a", "r", 600);
        f.manager.login_by_username("admin", "shopware").await.unwrap();

        let Fixture {
            manager,
            transport,
            scheduler,
            ..
        } = f;
        drop(manager);

        assert_eq!(scheduler.fire_pending().await, 1);
        assert_eq!(transport.request_count(), 1);
    }

    #[test]
    fn test_create_id_format() {
        let id = create_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_logout_options() {
        assert_eq!(
            LogoutOptions::user(),
            LogoutOptions {
                inactivity: false,
                redirect: true
            }
        );
        assert!(!LogoutOptions::inactivity().without_redirect().redirect);
    }
}
