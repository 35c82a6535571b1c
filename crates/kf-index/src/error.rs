//! Active-token index error types.

use thiserror::Error;

/// Errors that can occur during index operations.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The backing transport is down or timed out.
    #[error("token index unavailable: {0}")]
    Unavailable(String),

    /// Invalid index configuration.
    #[error("token index configuration error: {0}")]
    Configuration(String),

    /// Internal index error.
    #[error("internal token index error: {0}")]
    Internal(String),
}

/// Result type for index operations.
pub type IndexResult<T> = Result<T, IndexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = IndexError::Unavailable("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));
    }
}
