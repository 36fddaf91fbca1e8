//! # CSI Auth Flow
//!
//! `csi-auth-flow` runs the OAuth2 Authorization Code flow with PKCE against the CSI identity
//! provider: it builds the authorization redirect and performs the back-channel token exchange.
//!
//! ## Key Components
//!
//! - **[`AuthorizationCodeFlow`]**: Holds one immutable [`ClientConfig`] and an HTTP client.
//!
//! Storing the verifier between redirect and callback, and the token afterwards, is left to the
//! host; [`csi_auth_core::AuthSession`] is one ready-made place to do it.

#![warn(missing_docs)]

/// Authorization Code + PKCE flow implementation.
pub mod authorization_code;

pub use authorization_code::AuthorizationCodeFlow;
pub use csi_auth_core::{AuthError, ClientConfig, Pkce, TokenResponse};
