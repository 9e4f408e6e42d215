//! Bearer API key validation.

use axum::http::HeaderMap;
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Validates the bearer credential presented on a request against the
/// configured API key.
pub struct AuthGate {
    // SHA-256 of the expected key; comparing digests keeps the check from
    // leaking matching key prefixes through timing.
    expected_digest: [u8; 32],
}

impl AuthGate {
    pub fn new(expected_key: &str) -> Self {
        Self {
            expected_digest: Sha256::digest(expected_key.as_bytes()).into(),
        }
    }

    /// Authenticate a request by validating its `Authorization: Bearer` header.
    ///
    /// Returns the presented credential on success, for per-credential
    /// accounting downstream.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<String> {
        let auth_header = headers
            .get("authorization")
            .ok_or_else(|| Error::Unauthorized("Missing API key".to_string()))?
            .to_str()
            .map_err(|_| Error::Unauthorized("Invalid Authorization header format".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| Error::Unauthorized("Invalid Authorization header format".to_string()))?;

        if token.is_empty() {
            return Err(Error::Unauthorized("Missing API key".to_string()));
        }

        let presented_digest: [u8; 32] = Sha256::digest(token.as_bytes()).into();
        if presented_digest != self.expected_digest {
            return Err(Error::Unauthorized("Invalid API key".to_string()));
        }

        Ok(token.to_string())
    }
}
