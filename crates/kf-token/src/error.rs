//! Token error types.

use thiserror::Error;

/// Errors that can occur when signing or verifying tokens.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token's expiry has passed (verifier wall clock).
    #[error("token expired")]
    Expired,

    /// The token structure cannot be parsed or the signature does not match.
    #[error("token malformed")]
    Malformed,

    /// Any other validation failure (wrong purpose, immature token, ...).
    #[error("token invalid: {0}")]
    Invalid(String),

    /// Signing failed.
    #[error("token signing failed: {0}")]
    Signing(String),
}

/// Result type for token operations.
pub type TokenResult<T> = Result<T, TokenError>;
