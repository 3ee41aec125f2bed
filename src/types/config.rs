//! Configuration Types
//!
//! Session manager configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::builders::SessionConfigBuilder;
use crate::error::{ConfigurationError, SessionError};

/// Cookie key holding the persisted bearer record.
pub const STORAGE_KEY: &str = "bearerAuth";

/// Token endpoint path relative to the API path.
pub const TOKEN_ENDPOINT_PATH: &str = "/oauth/token";

/// Default OAuth2 client id of the administration.
pub const DEFAULT_CLIENT_ID: &str = "administration";

/// Default scopes requested for a session.
pub const DEFAULT_SCOPES: &str = "write";

/// Cookie lifetime when activity-based expiry does not apply (7 days).
pub const DEFAULT_REMEMBER_DURATION: Duration = Duration::from_millis(7 * 86_400 * 1000);

/// Inactivity after which a session is forcibly ended (30 minutes).
pub const INACTIVITY_THRESHOLD: Duration = Duration::from_secs(30 * 60);

/// Default HTTP timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Deployment environment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    Development,
    Testing,
}

impl Environment {
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "prod" | "production" => Ok(Self::Production),
            "dev" | "development" => Ok(Self::Development),
            "test" | "testing" => Ok(Self::Testing),
            other => Err(format!("unknown environment: {}", other)),
        }
    }
}

/// Session manager configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Base URL of the admin API, e.g. `https://shop.example/api`.
    pub api_path: String,
    /// Base path of the administration, first half of the cookie path.
    pub base_path: String,
    /// Path info of the administration, second half of the cookie path.
    pub path_info: String,
    /// OAuth2 client id.
    pub client_id: String,
    /// Scopes requested for session grants.
    pub scopes: String,
    /// Deployment environment.
    pub environment: Environment,
    /// Deployment override for the remember-me cookie lifetime.
    pub refresh_token_ttl: Option<Duration>,
    /// Mark the bearer cookie `Secure`.
    pub cookie_secure: bool,
    /// HTTP timeout for token requests.
    pub timeout: Duration,
}

impl SessionConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::new()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ADMIN_API_PATH` (required): base URL of the admin API
    /// - `ADMIN_BASE_PATH`, `ADMIN_PATH_INFO` (optional): cookie path parts
    /// - `ADMIN_CLIENT_ID` (optional): OAuth2 client id
    /// - `ADMIN_ENVIRONMENT` (optional): `production`, `development` or `testing`
    /// - `ADMIN_REFRESH_TOKEN_TTL` (optional): remember-me lifetime in milliseconds
    /// - `ADMIN_COOKIE_SECURE` (optional): `true` to mark the cookie secure
    /// - `ADMIN_TIMEOUT` (optional): request timeout in seconds
    pub fn from_env() -> Result<Self, SessionError> {
        let mut builder = SessionConfigBuilder::new();

        if let Ok(api_path) = std::env::var("ADMIN_API_PATH") {
            builder = builder.api_path(api_path);
        }

        if let Ok(base_path) = std::env::var("ADMIN_BASE_PATH") {
            builder = builder.base_path(base_path);
        }

        if let Ok(path_info) = std::env::var("ADMIN_PATH_INFO") {
            builder = builder.path_info(path_info);
        }

        if let Ok(client_id) = std::env::var("ADMIN_CLIENT_ID") {
            builder = builder.client_id(client_id);
        }

        if let Ok(environment) = std::env::var("ADMIN_ENVIRONMENT") {
            let environment = environment
                .parse::<Environment>()
                .map_err(|e| invalid_env("ADMIN_ENVIRONMENT", e))?;
            builder = builder.environment(environment);
        }

        if let Ok(ttl) = std::env::var("ADMIN_REFRESH_TOKEN_TTL") {
            let ttl_ms = ttl
                .parse::<u64>()
                .map_err(|e| invalid_env("ADMIN_REFRESH_TOKEN_TTL", e))?;
            builder = builder.refresh_token_ttl(Duration::from_millis(ttl_ms));
        }

        if let Ok(secure) = std::env::var("ADMIN_COOKIE_SECURE") {
            builder = builder.cookie_secure(secure.eq_ignore_ascii_case("true") || secure == "1");
        }

        if let Ok(timeout) = std::env::var("ADMIN_TIMEOUT") {
            let timeout_secs = timeout
                .parse::<u64>()
                .map_err(|e| invalid_env("ADMIN_TIMEOUT", e))?;
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }

        builder.build()
    }

    /// Full URL of the token endpoint.
    pub fn token_endpoint(&self) -> String {
        format!("{}{}", self.api_path.trim_end_matches('/'), TOKEN_ENDPOINT_PATH)
    }

    /// Path the bearer cookie is scoped to.
    pub fn cookie_path(&self) -> String {
        let path = format!("{}{}", self.base_path, self.path_info);
        if path.is_empty() {
            "/".to_string()
        } else {
            path
        }
    }

    /// Cookie lifetime used when activity-based expiry does not apply.
    pub fn remember_duration(&self) -> Duration {
        self.refresh_token_ttl
            .filter(|ttl| !ttl.is_zero())
            .unwrap_or(DEFAULT_REMEMBER_DURATION)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            api_path: String::new(),
            base_path: String::new(),
            path_info: String::new(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            scopes: DEFAULT_SCOPES.to_string(),
            environment: Environment::default(),
            refresh_token_ttl: None,
            cookie_secure: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

fn invalid_env(variable: &str, error: impl std::fmt::Display) -> SessionError {
    SessionError::Configuration(ConfigurationError::InvalidConfig {
        message: format!("{}: {}", variable, error),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_endpoint() {
        let config = SessionConfig {
            api_path: "https://shop.example/api/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.token_endpoint(), "https://shop.example/api/oauth/token");
    }

    #[test]
    fn test_cookie_path() {
        let mut config = SessionConfig {
            base_path: "/shop".to_string(),
            path_info: "/admin".to_string(),
            ..Default::default()
        };
        assert_eq!(config.cookie_path(), "/shop/admin");

        config.base_path.clear();
        config.path_info.clear();
        assert_eq!(config.cookie_path(), "/");
    }

    #[test]
    fn test_remember_duration_default_and_override() {
        let mut config = SessionConfig::default();
        assert_eq!(config.remember_duration().as_millis(), 604_800_000);

        config.refresh_token_ttl = Some(Duration::from_millis(5000));
        assert_eq!(config.remember_duration(), Duration::from_millis(5000));

        config.refresh_token_ttl = Some(Duration::ZERO);
        assert_eq!(config.remember_duration(), DEFAULT_REMEMBER_DURATION);
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!("development".parse::<Environment>(), Ok(Environment::Development));
        assert_eq!("PROD".parse::<Environment>(), Ok(Environment::Production));
        assert!("staging".parse::<Environment>().is_err());
        assert!(Environment::Development.is_development());
        assert!(!Environment::Testing.is_development());
    }

    const ENV_VARS: [&str; 8] = [
        "ADMIN_API_PATH",
        "ADMIN_BASE_PATH",
        "ADMIN_PATH_INFO",
        "ADMIN_CLIENT_ID",
        "ADMIN_ENVIRONMENT",
        "ADMIN_REFRESH_TOKEN_TTL",
        "ADMIN_COOKIE_SECURE",
        "ADMIN_TIMEOUT",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
    }

    fn assert_invalid_env(variable: &str, value: &str) {
        std::env::set_var(variable, value);
        match SessionConfig::from_env() {
            Err(SessionError::Configuration(ConfigurationError::InvalidConfig { message })) => {
                assert!(message.starts_with(variable), "{}", message);
            }
            other => panic!("expected invalid {}, got {:?}", variable, other),
        }
        std::env::remove_var(variable);
    }

    // Environment variables are process-wide, so every case runs in one test.
    #[test]
    fn test_from_env() {
        clear_env();
        assert!(SessionConfig::from_env().is_err());

        std::env::set_var("ADMIN_API_PATH", "https://shop.example/api");
        std::env::set_var("ADMIN_BASE_PATH", "/shop");
        std::env::set_var("ADMIN_PATH_INFO", "/admin");
        std::env::set_var("ADMIN_ENVIRONMENT", "development");
        std::env::set_var("ADMIN_REFRESH_TOKEN_TTL", "5000");
        std::env::set_var("ADMIN_COOKIE_SECURE", "true");
        std::env::set_var("ADMIN_TIMEOUT", "10");

        let config = SessionConfig::from_env().unwrap();
        assert_eq!(config.cookie_path(), "/shop/admin");
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.refresh_token_ttl, Some(Duration::from_millis(5000)));
        assert!(config.cookie_secure);
        assert_eq!(config.timeout, Duration::from_secs(10));

        std::env::remove_var("ADMIN_ENVIRONMENT");
        std::env::remove_var("ADMIN_REFRESH_TOKEN_TTL");
        std::env::remove_var("ADMIN_TIMEOUT");
        assert_invalid_env("ADMIN_ENVIRONMENT", "develop");
        assert_invalid_env("ADMIN_REFRESH_TOKEN_TTL", "7d");
        assert_invalid_env("ADMIN_TIMEOUT", "-1");

        clear_env();
    }
}
