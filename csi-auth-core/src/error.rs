use serde::{Deserialize, Serialize};

/// Errors that can occur while running the authorization code flow.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The client identity or provider endpoints are missing or invalid
    #[error("Client not configured: {0}")]
    Configuration(String),
    /// The code verifier does not satisfy RFC 7636
    #[error("Invalid code verifier")]
    InvalidVerifier,
    /// The token request never got an HTTP response
    #[error("Network error: {0}")]
    Network(String),
    /// The token endpoint answered with a non-success status
    #[error("Failed to fetch token: {status_text} - {body}")]
    TokenRejected {
        /// The HTTP status code.
        status: u16,
        /// The canonical reason phrase for `status`.
        status_text: String,
        /// The raw response body.
        body: String,
    },
    /// A success response whose body is not JSON
    #[error("Failed to parse token response: {0}")]
    MalformedResponse(String),
}

impl AuthError {
    /// Parses the RFC 6749 error object out of a rejected token exchange, if the provider sent one.
    pub fn oauth_error(&self) -> Option<OAuthErrorResponse> {
        match self {
            AuthError::TokenRejected { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }
}

/// Represents an error response from an OAuth2 provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthErrorResponse {
    /// The error code.
    pub error: String,
    /// A human-readable ASCII text description of the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
}
