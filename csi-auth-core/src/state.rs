use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::pkce::Pkce;

/// The token endpoint's JSON body, kept exactly as the provider sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenResponse(Value);

impl TokenResponse {
    /// Wraps a raw JSON payload.
    pub fn new(payload: Value) -> Self {
        Self(payload)
    }

    /// The payload as received.
    pub fn as_json(&self) -> &Value {
        &self.0
    }

    /// Unwraps the payload.
    pub fn into_json(self) -> Value {
        self.0
    }

    /// The access token used for API requests
    pub fn access_token(&self) -> Option<&str> {
        self.str_field("access_token")
    }

    /// The type of token (usually "Bearer")
    pub fn token_type(&self) -> Option<&str> {
        self.str_field("token_type")
    }

    /// The OIDC ID Token
    pub fn id_token(&self) -> Option<&str> {
        self.str_field("id_token")
    }

    /// The refresh token, if the provider issued one
    pub fn refresh_token(&self) -> Option<&str> {
        self.str_field("refresh_token")
    }

    /// The scopes granted by the user
    pub fn scope(&self) -> Option<&str> {
        self.str_field("scope")
    }

    /// Seconds until the access token expires
    pub fn expires_in(&self) -> Option<u64> {
        self.0.get("expires_in").and_then(Value::as_u64)
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

impl From<Value> for TokenResponse {
    fn from(payload: Value) -> Self {
        Self(payload)
    }
}

/// A host session that may carry a stored token.
///
/// Nothing beyond an optional `token` is assumed about the container.
pub trait TokenSession {
    /// Whatever the host stored as the token.
    type Token: ?Sized;

    /// The stored token, or `None` when the visitor has not authenticated.
    fn token(&self) -> Option<&Self::Token>;
}

/// Returns the token stored in `session`, if any.
///
/// Absence is the normal state for an unauthenticated visitor and is never an error.
pub fn get_access_token<S: TokenSession + ?Sized>(session: &S) -> Option<&S::Token> {
    session.token()
}

impl TokenSession for Map<String, Value> {
    type Token = Value;

    fn token(&self) -> Option<&Value> {
        self.get("token").filter(|token| is_truthy(token))
    }
}

impl TokenSession for Value {
    type Token = Value;

    fn token(&self) -> Option<&Value> {
        self.as_object()?.token()
    }
}

impl<S: TokenSession> TokenSession for Option<S> {
    type Token = S::Token;

    fn token(&self) -> Option<&S::Token> {
        self.as_ref()?.token()
    }
}

impl<S: TokenSession + ?Sized> TokenSession for &S {
    type Token = S::Token;

    fn token(&self) -> Option<&S::Token> {
        (**self).token()
    }
}

// null, false, 0 and "" count as no token.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// A ready-made session slot for hosts that do not have their own.
///
/// Tracks the pending verifier between the redirect and the callback, then the token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Verifier of the authorization attempt in progress.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_verifier: Option<String>,
    /// Token payload from a completed exchange.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<TokenResponse>,
}

impl AuthSession {
    /// Holds the verifier of a new authorization attempt, replacing any earlier one.
    pub fn begin(&mut self, pkce: Pkce) {
        self.code_verifier = Some(pkce.code_verifier);
    }

    /// Removes the pending verifier. A verifier is presented at most once.
    pub fn take_code_verifier(&mut self) -> Option<String> {
        self.code_verifier.take()
    }

    /// Stores the token from a successful exchange.
    pub fn complete(&mut self, token: TokenResponse) {
        self.code_verifier = None;
        self.token = Some(token);
    }

    /// Whether a token is stored.
    pub fn is_authenticated(&self) -> bool {
        get_access_token(self).is_some()
    }
}

impl TokenSession for AuthSession {
    type Token = TokenResponse;

    fn token(&self) -> Option<&TokenResponse> {
        self.token.as_ref().filter(|token| is_truthy(token.as_json()))
    }
}
