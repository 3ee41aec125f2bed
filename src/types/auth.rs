//! Auth Types
//!
//! Bearer credential grants and token endpoint payloads.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{SessionError, StorageError};

/// One bearer-credential grant.
///
/// `expiry` is epoch milliseconds once the grant has been persisted. Grants
/// handed to [`crate::SessionManager::set_bearer_authentication`] carry it as
/// seconds-from-now instead.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthObject {
    pub access: String,
    pub refresh: String,
    pub expiry: i64,
}

impl AuthObject {
    /// Create a new grant.
    pub fn new(access: impl Into<String>, refresh: impl Into<String>, expiry: i64) -> Self {
        Self {
            access: access.into(),
            refresh: refresh.into(),
            expiry,
        }
    }

    /// Grant with the relative expiry reported by the token endpoint.
    pub fn from_response(response: &TokenResponse) -> Self {
        Self::new(
            response.access_token.clone(),
            response.refresh_token.clone(),
            response.expires_in,
        )
    }

    /// Serialize to the persisted record format.
    pub fn to_json(&self) -> Result<String, SessionError> {
        serde_json::to_string(self).map_err(|e| {
            SessionError::Storage(StorageError::Serialization {
                message: e.to_string(),
            })
        })
    }

    /// Parse a persisted record. Anything unparsable reads as no credentials.
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str::<Option<Self>>(raw).ok().flatten()
    }

    /// Read a single field. Empty tokens and a zero expiry read as `None`.
    pub fn field(&self, field: AuthField) -> Option<AuthValue> {
        match field {
            AuthField::Access if !self.access.is_empty() => {
                Some(AuthValue::Token(self.access.clone()))
            }
            AuthField::Refresh if !self.refresh.is_empty() => {
                Some(AuthValue::Token(self.refresh.clone()))
            }
            AuthField::Expiry if self.expiry != 0 => Some(AuthValue::Expiry(self.expiry)),
            _ => None,
        }
    }

    /// Check if the absolute expiry has passed.
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        self.expiry <= now_ms
    }
}

impl std::fmt::Debug for AuthObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthObject")
            .field("access", &"[REDACTED]")
            .field("refresh", &"[REDACTED]")
            .field("expiry", &self.expiry)
            .finish()
    }
}

/// Field selector for [`AuthObject::field`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthField {
    Access,
    Refresh,
    Expiry,
}

/// Value of a single [`AuthObject`] field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthValue {
    Token(String),
    Expiry(i64),
}

impl AuthValue {
    /// Token string, if this is a token field.
    pub fn as_token(&self) -> Option<&str> {
        match self {
            Self::Token(token) => Some(token),
            Self::Expiry(_) => None,
        }
    }

    /// Expiry timestamp, if this is the expiry field.
    pub fn as_expiry(&self) -> Option<i64> {
        match self {
            Self::Expiry(expiry) => Some(*expiry),
            Self::Token(_) => None,
        }
    }
}

/// Token response from the authorization endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    /// Lifetime in seconds.
    pub expires_in: i64,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// Grant type tag sent to the token endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
    Password,
    RefreshToken,
}

impl GrantType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Password => "password",
            Self::RefreshToken => "refresh_token",
        }
    }
}

/// How the requested scope is sent.
///
/// Session grants use the plural `scopes` key, identity verification the
/// singular `scope` key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScopeParam {
    Scopes(String),
    Scope(String),
}

/// Body of a token endpoint request.
#[derive(Clone)]
pub struct TokenRequest {
    pub grant_type: GrantType,
    pub client_id: String,
    pub scope: ScopeParam,
    pub username: Option<String>,
    pub password: Option<SecretString>,
    pub refresh_token: Option<SecretString>,
}

impl TokenRequest {
    /// Password grant for a session.
    pub fn password(
        client_id: impl Into<String>,
        scopes: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            grant_type: GrantType::Password,
            client_id: client_id.into(),
            scope: ScopeParam::Scopes(scopes.into()),
            username: Some(username.into()),
            password: Some(SecretString::new(password.into())),
            refresh_token: None,
        }
    }

    /// Password grant used only to re-confirm identity.
    pub fn verification(
        client_id: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            scope: ScopeParam::Scope("user-verified".to_string()),
            ..Self::password(client_id, String::new(), username, password)
        }
    }

    /// Refresh grant.
    pub fn refresh(
        client_id: impl Into<String>,
        scopes: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            grant_type: GrantType::RefreshToken,
            client_id: client_id.into(),
            scope: ScopeParam::Scopes(scopes.into()),
            username: None,
            password: None,
            refresh_token: Some(SecretString::new(refresh_token.into())),
        }
    }

    /// JSON body with secrets exposed.
    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        body.insert("grant_type".into(), Value::from(self.grant_type.as_str()));
        body.insert("client_id".into(), Value::from(self.client_id.as_str()));

        match &self.scope {
            ScopeParam::Scopes(scopes) => body.insert("scopes".into(), Value::from(scopes.as_str())),
            ScopeParam::Scope(scope) => body.insert("scope".into(), Value::from(scope.as_str())),
        };

        if let Some(username) = &self.username {
            body.insert("username".into(), Value::from(username.as_str()));
        }
        if let Some(password) = &self.password {
            body.insert("password".into(), Value::from(password.expose_secret().as_str()));
        }
        if let Some(refresh_token) = &self.refresh_token {
            body.insert(
                "refresh_token".into(),
                Value::from(refresh_token.expose_secret().as_str()),
            );
        }

        Value::Object(body)
    }
}

impl std::fmt::Debug for TokenRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenRequest")
            .field("grant_type", &self.grant_type)
            .field("client_id", &self.client_id)
            .field("scope", &self.scope)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_parsing() {
        let json = r#"{
            "token_type": "Bearer",
            "expires_in": 600,
            "access_token": "access-1",
            "refresh_token": "refresh-1"
        }"#;

        let response: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.access_token, "access-1");
        assert_eq!(response.refresh_token, "refresh-1");
        assert_eq!(response.expires_in, 600);

        let auth = AuthObject::from_response(&response);
        assert_eq!(auth, AuthObject::new("access-1", "refresh-1", 600));
    }

    #[test]
    fn test_record_round_trip() {
        let auth = AuthObject::new("a", "r", 1_700_000_000_000);
        let raw = auth.to_json().unwrap();

        assert_eq!(raw, r#"{"access":"a","refresh":"r","expiry":1700000000000}"#);
        assert_eq!(AuthObject::from_json(&raw), Some(auth));
    }

    #[test]
    fn test_malformed_record_reads_as_none() {
        assert_eq!(AuthObject::from_json("{\"access\":"), None);
        assert_eq!(AuthObject::from_json("null"), None);
        assert_eq!(AuthObject::from_json(""), None);
        assert_eq!(AuthObject::from_json("[1,2]"), None);
    }

    #[test]
    fn test_field_access() {
        let auth = AuthObject::new("token", "", 0);

        assert_eq!(
            auth.field(AuthField::Access),
            Some(AuthValue::Token("token".to_string()))
        );
        assert_eq!(auth.field(AuthField::Refresh), None);
        assert_eq!(auth.field(AuthField::Expiry), None);
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let auth = AuthObject::new("secret-access", "secret-refresh", 5);
        let output = format!("{:?}", auth);

        assert!(!output.contains("secret-access"));
        assert!(!output.contains("secret-refresh"));
    }

    #[test]
    fn test_password_request_body() {
        let request = TokenRequest::password("administration", "write", "admin", "shopware");
        let body = request.to_json();

        assert_eq!(body["grant_type"], "password");
        assert_eq!(body["client_id"], "administration");
        assert_eq!(body["scopes"], "write");
        assert_eq!(body["username"], "admin");
        assert_eq!(body["password"], "shopware");
        assert!(body.get("scope").is_none());
        assert!(!format!("{:?}", request).contains("shopware"));
    }

    #[test]
    fn test_is_expired_at_boundary() {
        let auth = AuthObject::new("a", "r", 1_000);

        assert!(!auth.is_expired_at(999));
        assert!(auth.is_expired_at(1_000));
        assert!(auth.is_expired_at(1_001));
    }

    #[test]
    fn test_verification_request_uses_singular_scope() {
        let body = TokenRequest::verification("administration", "admin", "pw").to_json();

        assert_eq!(body["scope"], "user-verified");
        assert!(body.get("scopes").is_none());
    }

    #[test]
    fn test_refresh_request_body() {
        let body = TokenRequest::refresh("administration", "write", "refresh-1").to_json();

        assert_eq!(body["grant_type"], "refresh_token");
        assert_eq!(body["refresh_token"], "refresh-1");
        assert!(body.get("username").is_none());
    }
}
