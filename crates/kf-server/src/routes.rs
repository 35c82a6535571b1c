//! Router and request handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::middleware;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use kf_model::TokenPair;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::{require_session, AuthSession};
use crate::error::ApiResult;
use crate::state::AppState;

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/accesstoken/{token}", get(refresh_access_token));

    let protected = Router::new()
        .route("/password/change", post(change_password))
        .route("/logout", post(logout))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    let health = Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness_check));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(public)
        .merge(protected)
        .merge(health)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Username/password request body for signup and login.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    /// Username.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// Request body for a password change.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// The current password.
    pub old_password: String,
    /// The replacement password.
    pub new_password: String,
}

/// Token response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// The freshly issued access token.
    pub access_token: String,
    /// The refresh token, present when a new session was opened.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Token format marker.
    pub token_type: &'static str,
}

impl TokenResponse {
    fn from_pair(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: Some(pair.refresh_token),
            token_type: "JWT",
        }
    }

    fn access_only(access_token: String) -> Self {
        Self {
            access_token,
            refresh_token: None,
            token_type: "JWT",
        }
    }
}

/// `POST /signup`
async fn signup(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> ApiResult<(StatusCode, Json<TokenResponse>)> {
    let pair = state.sessions.signup(&body.username, &body.password).await?;
    Ok((StatusCode::CREATED, Json(TokenResponse::from_pair(pair))))
}

/// `POST /login`
async fn login(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let pair = state.sessions.login(&body.username, &body.password).await?;
    Ok(Json(TokenResponse::from_pair(pair)))
}

/// `GET /accesstoken/{token}`
///
/// Redeems a refresh token for a new access token. The presented token
/// is consumed whether or not redemption succeeds.
async fn refresh_access_token(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> ApiResult<Json<TokenResponse>> {
    let access_token = state.sessions.refresh_access_token(&token).await?;
    Ok(Json(TokenResponse::access_only(access_token)))
}

/// `POST /password/change`
async fn change_password(
    State(state): State<AppState>,
    auth: AuthSession,
    Json(body): Json<ChangePasswordRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let access_token = state
        .sessions
        .change_password(auth.claims.sub, &body.old_password, &body.new_password)
        .await?;
    Ok(Json(TokenResponse::access_only(access_token)))
}

/// `POST /logout`
async fn logout(State(state): State<AppState>, auth: AuthSession) -> ApiResult<StatusCode> {
    state.sessions.logout(auth.claims.sub, &auth.token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
}

/// Basic health check.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    })
}

/// Kubernetes liveness probe.
async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check() {
        let response = health_check().await;
        assert_eq!(response.0.status, "healthy");
    }

    #[test]
    fn token_response_serialization() {
        let body = TokenResponse::from_pair(TokenPair::new("aaa", "rrr"));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["accessToken"], "aaa");
        assert_eq!(json["refreshToken"], "rrr");
        assert_eq!(json["tokenType"], "JWT");
    }

    #[test]
    fn access_only_response_omits_refresh_token() {
        let body = TokenResponse::access_only("aaa".to_string());
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("refreshToken").is_none());
    }

    #[test]
    fn change_password_request_is_camel_case() {
        let body: ChangePasswordRequest =
            serde_json::from_str(r#"{"oldPassword":"a","newPassword":"b"}"#).unwrap();
        assert_eq!(body.old_password, "a");
        assert_eq!(body.new_password, "b");
    }
}
