//! Storage error types.

use thiserror::Error;

/// Errors that can occur during durable-store operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No record matched the lookup.
    #[error("{entity} not found")]
    NotFound {
        /// Type of entity (e.g. "Credential").
        entity: &'static str,
    },

    /// Unique constraint violation.
    #[error("duplicate {entity}: {field} '{value}' already exists")]
    Duplicate {
        /// Type of entity.
        entity: &'static str,
        /// Field that caused the conflict.
        field: &'static str,
        /// Conflicting value.
        value: String,
    },

    /// The backing store cannot be reached right now.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A query failed for a non-transport reason.
    #[error("storage query error: {0}")]
    Query(String),

    /// Internal storage error.
    #[error("internal storage error: {0}")]
    Internal(String),
}

impl StorageError {
    /// Creates a not found error for an entity.
    #[must_use]
    pub const fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }

    /// Creates a duplicate error.
    #[must_use]
    pub fn duplicate(entity: &'static str, field: &'static str, value: impl Into<String>) -> Self {
        Self::Duplicate {
            entity,
            field,
            value: value.into(),
        }
    }

    /// Checks if this is a not found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Checks if this is a duplicate error.
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
