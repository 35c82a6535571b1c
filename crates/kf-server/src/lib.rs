//! # kf-server
//!
//! The Keyfort HTTP server: wires the Postgres credential store, the
//! Redis active-token index, the password hasher, and the token signer
//! into the session manager, and exposes the session operations over an
//! Axum router.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use auth::AuthSession;
pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
