//! SQL storage error conversion.

use kf_storage::StorageError;
use sqlx::Error as SqlxError;

/// Checks whether the error is a unique-constraint violation
/// (`PostgreSQL` error code 23505).
pub fn is_unique_violation(err: &SqlxError) -> bool {
    match err {
        SqlxError::Database(db_err) => db_err.code().is_some_and(|c| c == "23505"),
        _ => false,
    }
}

/// Converts a `SQLx` error to a storage error.
#[allow(clippy::needless_pass_by_value)]
pub fn from_sqlx_error(err: SqlxError) -> StorageError {
    match err {
        SqlxError::PoolTimedOut => StorageError::Unavailable("connection pool timeout".to_string()),
        SqlxError::PoolClosed => StorageError::Unavailable("connection pool closed".to_string()),
        SqlxError::Io(e) => StorageError::Unavailable(e.to_string()),
        SqlxError::Database(db_err) => StorageError::Query(db_err.to_string()),
        _ => StorageError::Internal(err.to_string()),
    }
}
