//! Configuration Builder
//!
//! Fluent builder for session configuration.

use std::time::Duration;
use url::Url;

use crate::error::{ConfigurationError, SessionError};
use crate::types::{
    Environment, SessionConfig, DEFAULT_CLIENT_ID, DEFAULT_SCOPES, DEFAULT_TIMEOUT,
};

/// Session configuration builder.
#[derive(Default)]
pub struct SessionConfigBuilder {
    api_path: Option<String>,
    base_path: Option<String>,
    path_info: Option<String>,
    client_id: Option<String>,
    scopes: Option<String>,
    environment: Option<Environment>,
    refresh_token_ttl: Option<Duration>,
    cookie_secure: bool,
    timeout: Option<Duration>,
}

impl SessionConfigBuilder {
    /// Create new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the admin API base URL.
    pub fn api_path(mut self, api_path: impl Into<String>) -> Self {
        self.api_path = Some(api_path.into());
        self
    }

    /// Set the administration base path.
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    /// Set the administration path info.
    pub fn path_info(mut self, path_info: impl Into<String>) -> Self {
        self.path_info = Some(path_info.into());
        self
    }

    /// Set the OAuth2 client id.
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Set the scopes requested for session grants.
    pub fn scopes(mut self, scopes: impl Into<String>) -> Self {
        self.scopes = Some(scopes.into());
        self
    }

    /// Set the deployment environment.
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Override the remember-me cookie lifetime.
    pub fn refresh_token_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_token_ttl = Some(ttl);
        self
    }

    /// Mark the bearer cookie secure.
    pub fn cookie_secure(mut self, secure: bool) -> Self {
        self.cookie_secure = secure;
        self
    }

    /// Set request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the session configuration.
    pub fn build(self) -> Result<SessionConfig, SessionError> {
        let api_path = self.api_path.ok_or_else(|| {
            SessionError::Configuration(ConfigurationError::MissingField {
                field: "api_path".to_string(),
            })
        })?;

        if Url::parse(&api_path).is_err() {
            return Err(SessionError::Configuration(
                ConfigurationError::InvalidApiPath { url: api_path },
            ));
        }

        let client_id = self
            .client_id
            .unwrap_or_else(|| DEFAULT_CLIENT_ID.to_string());
        if client_id.trim().is_empty() {
            return Err(SessionError::Configuration(ConfigurationError::InvalidConfig {
                message: "client_id must not be empty".to_string(),
            }));
        }

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(SessionError::Configuration(ConfigurationError::InvalidConfig {
                message: "timeout must be greater than zero".to_string(),
            }));
        }

        Ok(SessionConfig {
            api_path,
            base_path: self.base_path.unwrap_or_default(),
            path_info: self.path_info.unwrap_or_default(),
            client_id,
            scopes: self.scopes.unwrap_or_else(|| DEFAULT_SCOPES.to_string()),
            environment: self.environment.unwrap_or_default(),
            refresh_token_ttl: self.refresh_token_ttl,
            cookie_secure: self.cookie_secure,
            timeout,
        })
    }
}

/// Create a new session configuration builder.
pub fn session_config() -> SessionConfigBuilder {
    SessionConfigBuilder::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_success() {
        let config = SessionConfigBuilder::new()
            .api_path("https://shop.example/api")
            .base_path("/shop")
            .path_info("/admin")
            .environment(Environment::Development)
            .refresh_token_ttl(Duration::from_secs(3600))
            .build()
            .unwrap();

        assert_eq!(config.client_id, "administration");
        assert_eq!(config.scopes, "write");
        assert_eq!(config.cookie_path(), "/shop/admin");
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.remember_duration(), Duration::from_secs(3600));
        assert!(!config.cookie_secure);
    }

    #[test]
    fn test_builder_missing_api_path() {
        let result = SessionConfigBuilder::new().build();

        assert!(matches!(
            result,
            Err(SessionError::Configuration(ConfigurationError::MissingField { .. }))
        ));
    }

    #[test]
    fn test_builder_invalid_api_path() {
        let result = session_config().api_path("not a url").build();

        assert!(matches!(
            result,
            Err(SessionError::Configuration(ConfigurationError::InvalidApiPath { .. }))
        ));
    }

    #[test]
    fn test_builder_rejects_empty_client_id() {
        let result = session_config()
            .api_path("https://shop.example/api")
            .client_id("  ")
            .build();

        assert!(result.is_err());
    }
}
