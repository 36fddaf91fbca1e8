use csi_auth_core::{
    pkce::{is_valid_code_verifier, Pkce},
    AuthError, ClientConfig, TokenResponse,
};

/// Orchestrates the Authorization Code flow with PKCE (RFC 6749 Section 4.1, RFC 7636).
///
/// The client is public: it authenticates with `client_id` in the request body only and the
/// code verifier binds the code to this client.
#[derive(Debug, Clone)]
pub struct AuthorizationCodeFlow {
    config: ClientConfig,
    http_client: reqwest::Client,
}

impl AuthorizationCodeFlow {
    /// Creates a new `AuthorizationCodeFlow` with a default HTTP client.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Use a preconfigured HTTP client, e.g. one with timeouts or a proxy.
    pub fn with_http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = http_client;
        self
    }

    /// The configuration this flow was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Builds the URL to redirect the user to.
    ///
    /// The caller performs the redirect and must keep the verifier behind `code_challenge`
    /// until the callback.
    pub fn authorization_url(&self, code_challenge: &str) -> Result<String, AuthError> {
        tracing::debug!(
            endpoint = self.config.authorization_endpoint(),
            "building authorization url"
        );
        self.config.authorization_url(code_challenge)
    }

    /// Generates a fresh PKCE pair and the authorization URL carrying its challenge.
    pub fn start(&self) -> Result<(String, Pkce), AuthError> {
        let pkce = Pkce::new();
        let url = self.authorization_url(&pkce.code_challenge)?;
        Ok((url, pkce))
    }

    /// Exchanges an authorization code and its verifier for tokens.
    ///
    /// A single attempt is made. A non-success status yields [`AuthError::TokenRejected`] with
    /// the response body; the success body is returned as-is.
    ///
    /// A verifier that is not 43 to 128 RFC 7636 characters is refused with
    /// [`AuthError::InvalidVerifier`] before any request is sent.
    pub async fn exchange_code_for_token(
        &self,
        code: &str,
        code_verifier: &str,
    ) -> Result<TokenResponse, AuthError> {
        self.config.validate()?;
        if !is_valid_code_verifier(code_verifier) {
            return Err(AuthError::InvalidVerifier);
        }

        let params = [
            ("grant_type", "authorization_code"),
            ("client_id", self.config.client_id.as_str()),
            ("code", code),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("code_verifier", code_verifier),
        ];

        let token_endpoint = self.config.token_endpoint();
        tracing::debug!(endpoint = token_endpoint, "exchanging authorization code");

        let response = self
            .http_client
            .post(token_endpoint)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "token request failed");
                AuthError::Network(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "token endpoint rejected the code");
            return Err(AuthError::TokenRejected {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| AuthError::MalformedResponse(e.to_string()))
    }
}
