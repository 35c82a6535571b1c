//! Bearer-gate middleware for the protected routes.
//!
//! Validates the Authorization header through the session manager and
//! injects an [`AuthSession`] into the request extensions.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kf_session::extract_token;
use kf_token::Claims;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated session context.
///
/// Extracted from the access token and made available to handlers.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Verified token claims.
    pub claims: Claims,
    /// The raw access token the claims were verified from.
    pub token: String,
}

/// Middleware that validates the access token on protected routes.
///
/// The scheme prefix is tolerated but not required; `Bearer <token>`,
/// `JWT: <token>`, and a bare token are all accepted.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(header_value) = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
    else {
        return ApiError::MissingAuthorization.into_response();
    };

    match state.sessions.validate_access_token(&header_value).await {
        Ok(claims) => {
            // extract_token succeeded inside validation; this re-parse
            // cannot fail.
            let token = match extract_token(&header_value) {
                Ok(t) => t.to_string(),
                Err(err) => return ApiError::from(err).into_response(),
            };
            request.extensions_mut().insert(AuthSession { claims, token });
            next.run(request).await
        }
        Err(err) => ApiError::from(err).into_response(),
    }
}

/// Axum extractor for [`AuthSession`].
///
/// Only succeeds on routes behind [`require_session`].
impl<S> FromRequestParts<S> for AuthSession
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or((StatusCode::UNAUTHORIZED, "Not authenticated"))
    }
}
