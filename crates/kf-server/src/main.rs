//! # Keyfort Server
//!
//! Main entry point for the Keyfort server.

#![forbid(unsafe_code)]

use std::sync::Arc;

use kf_crypto::PasswordHasherService;
use kf_index_redis::RedisTokenIndex;
use kf_server::{create_router, AppState, ServerConfig};
use kf_session::SessionManager;
use kf_storage_sql::{create_pool, run_migrations, PgCredentialStore, PgRefreshTokenStore};
use kf_token::TokenSigner;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.clone()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Keyfort starting...");

    let pool = create_pool(&config.pool_config()).await?;
    run_migrations(&pool).await?;
    tracing::info!("database ready");

    let index = RedisTokenIndex::connect(config.redis.clone()).await?;
    tracing::info!("active-token index ready");

    let sessions = SessionManager::new(
        Arc::new(PgCredentialStore::new(pool.clone())),
        Arc::new(PgRefreshTokenStore::new(pool)),
        Arc::new(index),
        PasswordHasherService::with_defaults(),
        TokenSigner::new(config.token_secret.as_bytes(), config.token_config()),
    );

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(config, Arc::new(sessions));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
