use crate::{error::AuthError, pkce::CODE_CHALLENGE_METHOD};
use url::Url;

/// The CSI authorization endpoint.
pub const AUTHORIZATION_ENDPOINT: &str = "https://csi.slb.com/v2/auth";
/// The CSI token endpoint.
pub const TOKEN_ENDPOINT: &str = "https://csi.slb.com/v2/token";

const ENV_CLIENT_ID: &str = "CSI_CLIENT_ID";
const ENV_REDIRECT_URI: &str = "CSI_REDIRECT_URI";
const ENV_AUDIENCE: &str = "CSI_AUDIENCE";

/// Client identity and provider endpoints.
///
/// Built once at startup and never mutated; share it by cloning or by sharing the flow that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// The public client identifier registered with the provider.
    pub client_id: String,
    /// Where the provider sends the user back with the authorization code.
    pub redirect_uri: String,
    /// Resource audience, requested as the scope next to `openid`.
    pub audience: String,
    authorization_endpoint: String,
    token_endpoint: String,
}

impl ClientConfig {
    /// Creates a configuration pointing at the CSI endpoints.
    pub fn new(
        client_id: impl Into<String>,
        redirect_uri: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            redirect_uri: redirect_uri.into(),
            audience: audience.into(),
            authorization_endpoint: AUTHORIZATION_ENDPOINT.to_string(),
            token_endpoint: TOKEN_ENDPOINT.to_string(),
        }
    }

    /// Reads `CSI_CLIENT_ID`, `CSI_REDIRECT_URI` and `CSI_AUDIENCE` from the environment.
    pub fn from_env() -> Result<Self, AuthError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup using the same keys as [`Self::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AuthError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| AuthError::Configuration(format!("{key} must be set")))
        };

        let config = Self::new(
            require(ENV_CLIENT_ID)?,
            require(ENV_REDIRECT_URI)?,
            require(ENV_AUDIENCE)?,
        );
        config.validate()?;
        Ok(config)
    }

    /// Points the flow at other endpoints, e.g. a mock server.
    pub fn with_test_urls(
        mut self,
        authorization_endpoint: impl Into<String>,
        token_endpoint: impl Into<String>,
    ) -> Self {
        self.authorization_endpoint = authorization_endpoint.into();
        self.token_endpoint = token_endpoint.into();
        self
    }

    /// The authorization endpoint in use.
    pub fn authorization_endpoint(&self) -> &str {
        &self.authorization_endpoint
    }

    /// The token endpoint in use.
    pub fn token_endpoint(&self) -> &str {
        &self.token_endpoint
    }

    /// The scope requested at the authorization endpoint.
    pub fn scope(&self) -> String {
        format!("openid {}", self.audience)
    }

    /// Checks that the client identity is present and both endpoints are absolute URLs.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.client_id.is_empty() {
            return Err(AuthError::Configuration("client_id is empty".into()));
        }
        if self.redirect_uri.is_empty() {
            return Err(AuthError::Configuration("redirect_uri is empty".into()));
        }
        parse_endpoint("authorization", &self.authorization_endpoint)?;
        parse_endpoint("token", &self.token_endpoint)?;
        Ok(())
    }

    /// Builds the redirect URL for the authorization endpoint.
    ///
    /// Parameters are appended in a fixed order and form-urlencoded.
    pub fn authorization_url(&self, code_challenge: &str) -> Result<String, AuthError> {
        self.validate()?;
        let mut url = parse_endpoint("authorization", &self.authorization_endpoint)?;
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("code_challenge", code_challenge)
            .append_pair("code_challenge_method", CODE_CHALLENGE_METHOD)
            .append_pair("scope", &self.scope());
        Ok(url.into())
    }
}

fn parse_endpoint(name: &str, endpoint: &str) -> Result<Url, AuthError> {
    Url::parse(endpoint)
        .map_err(|e| AuthError::Configuration(format!("invalid {name} endpoint {endpoint:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config() -> ClientConfig {
        ClientConfig::new("my-client", "https://app.example.com/callback", "api://reports")
    }

    #[test]
    fn test_new_uses_fixed_endpoints() {
        let config = config();
        assert_eq!(config.authorization_endpoint(), AUTHORIZATION_ENDPOINT);
        assert_eq!(config.token_endpoint(), TOKEN_ENDPOINT);
        assert_eq!(config.scope(), "openid api://reports");
    }

    #[test]
    fn test_authorization_url_query() {
        let url = config().authorization_url("challenge-abc").unwrap();
        assert!(url.starts_with("https://csi.slb.com/v2/auth?"));

        let parsed = Url::parse(&url).unwrap();
        let pairs: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("response_type".into(), "code".into()),
                ("client_id".into(), "my-client".into()),
                ("redirect_uri".into(), "https://app.example.com/callback".into()),
                ("code_challenge".into(), "challenge-abc".into()),
                ("code_challenge_method".into(), "S256".into()),
                ("scope".into(), "openid api://reports".into()),
            ]
        );
    }

    #[test]
    fn test_authorization_url_escapes_values() {
        let url = config().authorization_url("abc").unwrap();
        assert!(url.contains("redirect_uri=https%3A%2F%2Fapp.example.com%2Fcallback"));
        assert!(url.contains("scope=openid+api%3A%2F%2Freports"));
    }

    #[test]
    fn test_missing_client_identity_is_a_configuration_error() {
        let err = ClientConfig::new("", "https://app/cb", "aud")
            .authorization_url("abc")
            .unwrap_err();
        assert!(matches!(err, AuthError::Configuration(_)));

        let err = ClientConfig::new("id", "", "aud")
            .authorization_url("abc")
            .unwrap_err();
        assert!(matches!(err, AuthError::Configuration(_)));
    }

    #[test]
    fn test_bad_endpoint_is_a_configuration_error() {
        let err = config()
            .with_test_urls("not a url", TOKEN_ENDPOINT)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("authorization endpoint"));
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("CSI_CLIENT_ID", "env-client"),
            ("CSI_REDIRECT_URI", "http://localhost:3000/callback"),
            ("CSI_AUDIENCE", "aud"),
        ]
        .into_iter()
        .collect();

        let config = ClientConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.client_id, "env-client");
        assert_eq!(config.redirect_uri, "http://localhost:3000/callback");
        assert_eq!(config.token_endpoint(), TOKEN_ENDPOINT);
    }

    #[test]
    fn test_from_lookup_names_missing_variable() {
        let err = ClientConfig::from_lookup(|k| {
            (k != "CSI_REDIRECT_URI").then(|| "value".to_string())
        })
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Client not configured: CSI_REDIRECT_URI must be set"
        );
    }
}
