//! Token Exchange
//!
//! Password and refresh-token grants against the admin token endpoint.

use async_trait::async_trait;
use std::sync::Arc;

use crate::core::{HttpRequest, HttpTransport};
use crate::error::{create_error_from_response, ProtocolError, SessionError};
use crate::types::{SessionConfig, TokenRequest, TokenResponse};

/// Token exchange interface.
#[async_trait]
pub trait TokenExchange: Send + Sync {
    /// Exchange a grant for a token response.
    async fn exchange(&self, request: TokenRequest) -> Result<TokenResponse, SessionError>;
}

/// Token exchange over an [`HttpTransport`]. No retries.
pub struct TokenExchangeImpl {
    config: SessionConfig,
    transport: Arc<dyn HttpTransport>,
}

impl TokenExchangeImpl {
    /// Create new token exchange.
    pub fn new(config: SessionConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    /// Password grant for a session.
    pub fn password_request(&self, username: &str, password: &str) -> TokenRequest {
        TokenRequest::password(
            self.config.client_id.as_str(),
            self.config.scopes.as_str(),
            username,
            password,
        )
    }

    /// Password grant that only confirms identity.
    pub fn verification_request(&self, username: &str, password: &str) -> TokenRequest {
        TokenRequest::verification(self.config.client_id.as_str(), username, password)
    }

    /// Refresh grant.
    pub fn refresh_request(&self, refresh_token: &str) -> TokenRequest {
        TokenRequest::refresh(
            self.config.client_id.as_str(),
            self.config.scopes.as_str(),
            refresh_token,
        )
    }
}

#[async_trait]
impl TokenExchange for TokenExchangeImpl {
    async fn exchange(&self, request: TokenRequest) -> Result<TokenResponse, SessionError> {
        let grant_type = request.grant_type.as_str();
        let http_request =
            HttpRequest::post_json(self.config.token_endpoint(), &request.to_json())
                .with_timeout(self.config.timeout);

        tracing::debug!(grant_type, url = %http_request.url, "requesting token");

        let response = self.transport.send(http_request).await?;

        if !response.is_success() {
            tracing::debug!(grant_type, status = response.status, "token request rejected");
            return Err(create_error_from_response(response.status, &response.body));
        }

        serde_json::from_str(&response.body).map_err(|e| {
            SessionError::Protocol(ProtocolError::InvalidJson {
                message: e.to_string(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MockHttpTransport;
    use crate::error::ProviderError;

    fn create_exchange(transport: Arc<MockHttpTransport>) -> TokenExchangeImpl {
        let config = SessionConfig {
            api_path: "https://shop.example/api".to_string(),
            ..Default::default()
        };
        TokenExchangeImpl::new(config, transport)
    }

    #[tokio::test]
    async fn test_password_exchange() {
        let transport = Arc::new(MockHttpTransport::new());
        transport.queue_token_response("access-1", "refresh-1", 600);
        let exchange = create_exchange(transport.clone());

        let request = exchange.password_request("admin", "shopware");
        let response = exchange.exchange(request).await.unwrap();

        assert_eq!(response.access_token, "access-1");
        assert_eq!(response.expires_in, 600);

        let sent = transport.get_last_request().unwrap();
        assert_eq!(sent.url, "https://shop.example/api/oauth/token");
        let body = sent.json_body().unwrap();
        assert_eq!(body["grant_type"], "password");
        assert_eq!(body["client_id"], "administration");
        assert_eq!(body["scopes"], "write");
    }

    #[tokio::test]
    async fn test_exchange_maps_error_body() {
        let transport = Arc::new(MockHttpTransport::new());
        transport.queue_json_response(
            400,
            &serde_json::json!({"error": "invalid_grant", "error_description": "bad password"}),
        );
        let exchange = create_exchange(transport);

        let result = exchange
            .exchange(exchange.verification_request("admin", "wrong"))
            .await;

        assert!(matches!(
            result,
            Err(SessionError::Provider(ProviderError::InvalidGrant { .. }))
        ));
    }

    #[tokio::test]
    async fn test_exchange_rejects_invalid_json() {
        let transport = Arc::new(MockHttpTransport::new());
        transport.queue_json_response(200, &serde_json::json!({"unexpected": true}));
        let exchange = create_exchange(transport);

        let result = exchange.exchange(exchange.refresh_request("r")).await;

        assert!(matches!(
            result,
            Err(SessionError::Protocol(ProtocolError::InvalidJson { .. }))
        ));
    }
}
