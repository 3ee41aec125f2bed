//! Session Error Types
//!
//! Error hierarchy for the session token manager.

use std::time::Duration;
use thiserror::Error;

/// Root error type for session operations.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Snapshot capture failed: {message}")]
    Snapshot { message: String },
}

impl SessionError {
    /// Get error code for telemetry.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "SESSION_CONFIG",
            Self::Token(_) => "SESSION_TOKEN",
            Self::Network(_) => "SESSION_NETWORK",
            Self::Storage(_) => "SESSION_STORAGE",
            Self::Protocol(_) => "SESSION_PROTOCOL",
            Self::Provider(_) => "SESSION_PROVIDER",
            Self::Snapshot { .. } => "SESSION_SNAPSHOT",
        }
    }

    /// Whether the error came from the credential exchange itself.
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Provider(_) | Self::Protocol(_)
        )
    }

    /// Check if error requires the user to sign in again.
    pub fn needs_reauth(&self) -> bool {
        match self {
            Self::Token(TokenError::NoRefreshToken) => true,
            Self::Token(TokenError::NoCurrentUser) => true,
            Self::Provider(ProviderError::InvalidGrant { .. }) => true,
            Self::Provider(ProviderError::InvalidClient { .. }) => true,
            _ => false,
        }
    }

    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        get_user_message(self)
    }
}

/// Configuration error.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid API path: {url}")]
    InvalidApiPath { url: String },

    #[error("Invalid credentials: {message}")]
    InvalidCredentials { message: String },
}

/// Token-related error.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("No refresh token found")]
    NoRefreshToken,

    #[error("No user is logged in through this session")]
    NoCurrentUser,

    #[error("Invalid token: {message}")]
    InvalidToken { message: String },
}

/// Network/transport error.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("Request timeout after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("Client setup failed: {message}")]
    ClientSetup { message: String },
}

/// Protocol/response parsing error.
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    #[error("Unexpected redirect to: {location}")]
    UnexpectedRedirect { location: String },

    #[error("Response too large: {size} bytes")]
    ResponseTooLarge { size: usize },

    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },
}

/// Storage error.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Read failed: {message}")]
    ReadFailed { message: String },

    #[error("Write failed: {message}")]
    WriteFailed { message: String },

    #[error("Serialization failed: {message}")]
    Serialization { message: String },
}

/// Authorization server error.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Invalid client credentials")]
    InvalidClient { error_description: Option<String> },

    #[error("Invalid grant: {message}")]
    InvalidGrant { message: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Invalid scope: {scope}")]
    InvalidScope { scope: String },

    #[error("Unsupported grant type: {grant_type}")]
    UnsupportedGrantType { grant_type: String },

    #[error("Server error: {message}")]
    ServerError { message: String },

    #[error("Server temporarily unavailable")]
    TemporarilyUnavailable { retry_after: Option<Duration> },
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// OAuth2 error body returned by the token endpoint.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct TokenErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

/// Map a token endpoint error body to a provider error.
pub fn map_token_error(response: &TokenErrorResponse) -> ProviderError {
    let description = response
        .error_description
        .clone()
        .or_else(|| response.hint.clone());

    match response.error.as_str() {
        "invalid_client" => ProviderError::InvalidClient {
            error_description: description,
        },
        "invalid_grant" => ProviderError::InvalidGrant {
            message: description.unwrap_or_else(|| "Invalid grant".to_string()),
        },
        "invalid_scope" => ProviderError::InvalidScope {
            scope: description.unwrap_or_default(),
        },
        "unsupported_grant_type" => ProviderError::UnsupportedGrantType {
            grant_type: description.unwrap_or_default(),
        },
        "server_error" => ProviderError::ServerError {
            message: description.unwrap_or_else(|| "Server error".to_string()),
        },
        "temporarily_unavailable" => ProviderError::TemporarilyUnavailable { retry_after: None },
        _ => ProviderError::InvalidRequest {
            message: description.unwrap_or_else(|| response.error.clone()),
        },
    }
}

/// Parse error response from HTTP body.
pub fn parse_error_response(body: &str) -> Option<TokenErrorResponse> {
    serde_json::from_str(body).ok()
}

/// Create error from a non-success HTTP response.
pub fn create_error_from_response(status: u16, body: &str) -> SessionError {
    if let Some(response) = parse_error_response(body) {
        return SessionError::Provider(map_token_error(&response));
    }

    let error = match status {
        400 => ProviderError::InvalidRequest {
            message: "Bad request".to_string(),
        },
        401 => ProviderError::InvalidClient {
            error_description: Some("Unauthorized".to_string()),
        },
        403 => ProviderError::InvalidClient {
            error_description: Some("Forbidden".to_string()),
        },
        429 => ProviderError::TemporarilyUnavailable {
            retry_after: Some(Duration::from_secs(60)),
        },
        _ => ProviderError::ServerError {
            message: format!("HTTP {}", status),
        },
    };

    SessionError::Provider(error)
}

/// Get user-friendly error message.
pub fn get_user_message(error: &SessionError) -> String {
    match error {
        SessionError::Token(TokenError::NoRefreshToken) => {
            "Your session cannot be renewed. Please sign in again.".to_string()
        }
        SessionError::Provider(ProviderError::InvalidGrant { .. }) => {
            "The username or password is incorrect.".to_string()
        }
        SessionError::Network(NetworkError::Timeout { .. }) => {
            "The request timed out. Please check your connection and try again.".to_string()
        }
        SessionError::Provider(ProviderError::ServerError { .. })
        | SessionError::Provider(ProviderError::TemporarilyUnavailable { .. }) => {
            "The authentication service is temporarily unavailable. Please try again later."
                .to_string()
        }
        _ => "An authentication error occurred. Please try again.".to_string(),
    }
}
