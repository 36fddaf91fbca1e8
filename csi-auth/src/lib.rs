//! CSI Auth is an OAuth 2.0 Authorization Code + PKCE client for the CSI identity provider.
//!
//! This crate serves as a facade, re-exporting functionality from the other `csi-auth-*` crates
//! based on enabled features.

pub use csi_auth_core as core;

#[cfg(feature = "flow")]
pub use csi_auth_flow as flow;

pub use csi_auth_core::{
    generate_code_challenge, generate_code_verifier, get_access_token, AuthError, AuthSession,
    ClientConfig, Pkce, TokenResponse, TokenSession,
};

#[cfg(feature = "flow")]
pub use csi_auth_flow::AuthorizationCodeFlow;
