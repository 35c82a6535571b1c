//! Application state shared across request handlers.

use std::sync::Arc;

use kf_session::SessionManager;

use crate::config::ServerConfig;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: ServerConfig,

    /// The session manager.
    pub sessions: Arc<SessionManager>,
}

impl AppState {
    /// Creates a new application state.
    #[must_use]
    pub fn new(config: ServerConfig, sessions: Arc<SessionManager>) -> Self {
        Self { config, sessions }
    }
}
