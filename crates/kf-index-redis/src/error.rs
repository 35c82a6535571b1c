//! Redis error conversion.

use kf_index::IndexError;

/// Converts a `fred` Redis error to an `IndexError`.
#[allow(clippy::needless_pass_by_value)]
pub fn from_redis_error(err: fred::error::Error) -> IndexError {
    match err.kind() {
        fred::error::ErrorKind::IO | fred::error::ErrorKind::Timeout => {
            IndexError::Unavailable(err.to_string())
        }
        fred::error::ErrorKind::Config => IndexError::Configuration(err.to_string()),
        _ => IndexError::Internal(err.to_string()),
    }
}
