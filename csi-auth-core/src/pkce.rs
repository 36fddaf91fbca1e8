use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::{rng, CryptoRng, RngCore};
use sha2::{Digest, Sha256};

/// Number of random bytes behind a code verifier (43 characters once encoded).
pub const CODE_VERIFIER_BYTES: usize = 32;

/// The only challenge method this client sends.
pub const CODE_CHALLENGE_METHOD: &str = "S256";

/// Proof Key for Code Exchange (PKCE) parameters.
///
/// The verifier and challenge are always produced together, so the challenge sent to the
/// provider is the one the retained verifier will prove at token exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pkce {
    /// High-entropy cryptographic random string
    pub code_verifier: String,
    /// BASE64URL-ENCODE(SHA256(ASCII(code_verifier)))
    pub code_challenge: String,
}

impl Pkce {
    /// Generates a new PKCE verifier and challenge from the thread-local CSPRNG.
    pub fn new() -> Self {
        Self::from_verifier(generate_code_verifier())
    }

    /// Generates a new PKCE pair from the given random source.
    pub fn from_rng<R: CryptoRng + ?Sized>(rng: &mut R) -> Self {
        Self::from_verifier(generate_code_verifier_with(rng))
    }

    /// Derives the challenge for an existing verifier.
    pub fn from_verifier(code_verifier: String) -> Self {
        let code_challenge = generate_code_challenge(&code_verifier);
        Self {
            code_verifier,
            code_challenge,
        }
    }
}

impl Default for Pkce {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates a fresh code verifier: 32 random bytes, unpadded base64url.
pub fn generate_code_verifier() -> String {
    generate_code_verifier_with(&mut rng())
}

/// Same as [`generate_code_verifier`], drawing the bytes from `rng`.
///
/// The bound on [`CryptoRng`] keeps non-cryptographic generators out; tests pass a seeded
/// `StdRng` to get reproducible verifiers.
pub fn generate_code_verifier_with<R: CryptoRng + ?Sized>(rng: &mut R) -> String {
    let mut bytes = [0u8; CODE_VERIFIER_BYTES];
    rng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Computes the S256 challenge: unpadded base64url of SHA-256 over the verifier's UTF-8 bytes.
pub fn generate_code_challenge(code_verifier: &str) -> String {
    let hash = Sha256::digest(code_verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Checks RFC 7636 §4.1: 43 to 128 characters from `[A-Za-z0-9-._~]`.
pub fn is_valid_code_verifier(code_verifier: &str) -> bool {
    (43..=128).contains(&code_verifier.len())
        && code_verifier
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~'))
}
