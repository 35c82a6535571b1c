//! HTTP error responses.
//!
//! Maps the session error taxonomy to status codes and a `{message}`
//! JSON body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use kf_session::SessionError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A session operation failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The Authorization header is absent or not readable as a string.
    #[error("authorization header required")]
    MissingAuthorization,
}

impl ApiError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Session(err) => match err {
                SessionError::DuplicateUsername(_) => StatusCode::CONFLICT,
                SessionError::AccountNotFound => StatusCode::NOT_FOUND,
                SessionError::InvalidCredentials => StatusCode::FORBIDDEN,
                SessionError::IncorrectPassword => StatusCode::UNAUTHORIZED,
                SessionError::RefreshTokenNotFound
                | SessionError::TokenExpired
                | SessionError::TokenMalformed
                | SessionError::TokenInvalid => StatusCode::BAD_REQUEST,
                SessionError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                SessionError::HashingFailure(_) | SessionError::Internal(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::MissingAuthorization => StatusCode::UNAUTHORIZED,
        }
    }
}

/// API error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal detail stays in the logs; the body carries the
        // taxonomy message only.
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            match status {
                StatusCode::SERVICE_UNAVAILABLE => "storage unavailable".to_string(),
                _ => "internal server error".to_string(),
            }
        } else {
            self.to_string()
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}

/// Result type for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_errors_map_to_statuses() {
        let cases = [
            (
                SessionError::DuplicateUsername("alice".to_string()),
                StatusCode::CONFLICT,
            ),
            (SessionError::AccountNotFound, StatusCode::NOT_FOUND),
            (SessionError::InvalidCredentials, StatusCode::FORBIDDEN),
            (SessionError::IncorrectPassword, StatusCode::UNAUTHORIZED),
            (SessionError::RefreshTokenNotFound, StatusCode::BAD_REQUEST),
            (SessionError::TokenExpired, StatusCode::BAD_REQUEST),
            (SessionError::TokenMalformed, StatusCode::BAD_REQUEST),
            (SessionError::TokenInvalid, StatusCode::BAD_REQUEST),
            (
                SessionError::StorageUnavailable("down".to_string()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                SessionError::HashingFailure("oom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status_code(), expected);
        }
    }

    #[test]
    fn missing_authorization_is_unauthorized() {
        assert_eq!(
            ApiError::MissingAuthorization.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn server_errors_hide_internal_detail() {
        let response =
            ApiError::from(SessionError::Internal("pool exploded".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
