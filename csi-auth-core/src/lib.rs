//! # CSI Auth Core
//!
//! `csi-auth-core` holds the pieces of the CSI Authorization Code + PKCE client that need no network:
//! the PKCE engine, the client configuration, the error type and the token/session types.
//!
//! ## Key Components
//!
//! - **[`Pkce`]**: A matched code verifier / S256 code challenge pair.
//! - **[`ClientConfig`]**: Client identity plus the provider endpoints; builds the authorization URL.
//! - **[`TokenResponse`]**: The token endpoint's JSON body, passed through untouched.
//! - **[`TokenSession`]**: Read access to a token stored in a host session.
//! - **[`AuthError`]**: Every failure the flow can surface.

#![warn(missing_docs)]

/// Client configuration.
pub mod config;
/// Error types.
pub mod error;
/// PKCE (Proof Key for Code Exchange) utilities.
pub mod pkce;
/// Token payload and session access.
pub mod state;

pub use config::{ClientConfig, AUTHORIZATION_ENDPOINT, TOKEN_ENDPOINT};
pub use error::{AuthError, OAuthErrorResponse};
pub use pkce::{generate_code_challenge, generate_code_verifier, Pkce};
pub use state::{get_access_token, AuthSession, TokenResponse, TokenSession};
