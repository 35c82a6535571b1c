//! Session error taxonomy.
//!
//! Store and signer failures pass through to the caller re-tagged into a
//! stable, caller-facing kind; the session manager adds no retry logic of
//! its own. Transient `StorageUnavailable` errors are for the caller (or
//! a surrounding policy layer) to retry.

use kf_crypto::CryptoError;
use kf_index::IndexError;
use kf_storage::StorageError;
use kf_token::TokenError;
use thiserror::Error;

/// Errors surfaced by session manager operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// An account with that username already exists.
    #[error("an account with username '{0}' already exists")]
    DuplicateUsername(String),

    /// No account matched the lookup.
    #[error("account not found")]
    AccountNotFound,

    /// Username/password pair did not match (login).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Old password did not match (password change).
    #[error("incorrect password")]
    IncorrectPassword,

    /// The presented refresh token is unknown or already consumed;
    /// the client must re-authenticate.
    #[error("refresh token not found")]
    RefreshTokenNotFound,

    /// A presented token's expiry has passed.
    #[error("token expired")]
    TokenExpired,

    /// A presented token could not be parsed or its signature is wrong.
    #[error("token malformed")]
    TokenMalformed,

    /// A presented token failed some other validation check.
    #[error("token invalid")]
    TokenInvalid,

    /// One of the two stores cannot be reached; try again later.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    HashingFailure(String),

    /// Internal error outside the caller-facing taxonomy.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StorageError> for SessionError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Duplicate { value, .. } => Self::DuplicateUsername(value),
            StorageError::NotFound { .. } => Self::AccountNotFound,
            StorageError::Unavailable(msg) => Self::StorageUnavailable(msg),
            StorageError::Query(msg) | StorageError::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl From<IndexError> for SessionError {
    fn from(err: IndexError) -> Self {
        match err {
            IndexError::Unavailable(msg) => Self::StorageUnavailable(msg),
            IndexError::Configuration(msg) | IndexError::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl From<TokenError> for SessionError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => Self::TokenExpired,
            TokenError::Malformed => Self::TokenMalformed,
            TokenError::Invalid(_) => Self::TokenInvalid,
            TokenError::Signing(msg) => Self::Internal(msg),
        }
    }
}

impl From<CryptoError> for SessionError {
    fn from(err: CryptoError) -> Self {
        Self::HashingFailure(err.to_string())
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
