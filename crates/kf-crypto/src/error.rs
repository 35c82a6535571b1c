//! Crypto error types.

use thiserror::Error;

/// Errors that can occur during cryptographic operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Password hashing failed (parameter or resource exhaustion).
    #[error("password hashing failed: {0}")]
    Hashing(String),

    /// A stored salt could not be parsed.
    #[error("invalid salt: {0}")]
    InvalidSalt(String),
}

/// Result type for cryptographic operations.
pub type CryptoResult<T> = Result<T, CryptoError>;
