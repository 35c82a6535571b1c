//! Server configuration.
//!
//! Configuration is loaded from environment variables with sensible defaults.

use kf_index_redis::RedisConfig;
use kf_storage_sql::PoolConfig;
use kf_token::TokenConfig;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server host to bind to.
    pub host: String,

    /// Server port.
    pub port: u16,

    /// Database connection URL.
    pub database_url: String,

    /// Minimum database connections.
    pub db_min_connections: u32,

    /// Maximum database connections.
    pub db_max_connections: u32,

    /// HS256 secret for token signing.
    pub token_secret: String,

    /// Access token lifespan in seconds.
    pub access_token_lifespan: i64,

    /// Refresh token lifespan in seconds.
    pub refresh_token_lifespan: i64,

    /// Redis connection settings for the active-token index.
    pub redis: RedisConfig,

    /// Log level.
    pub log_level: String,
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when a required variable is missing.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        let host = std::env::var("KF_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("KF_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let db_min_connections = std::env::var("KF_DB_MIN_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1);

        let db_max_connections = std::env::var("KF_DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let token_secret = std::env::var("KF_TOKEN_SECRET")
            .map_err(|_| anyhow::anyhow!("KF_TOKEN_SECRET environment variable is required"))?;

        let access_token_lifespan = std::env::var("KF_ACCESS_TOKEN_LIFESPAN")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(300); // 5 minutes

        let refresh_token_lifespan = std::env::var("KF_REFRESH_TOKEN_LIFESPAN")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(86_400); // 1 day

        let mut redis = RedisConfig::new();
        if let Ok(redis_host) = std::env::var("KF_REDIS_HOST") {
            redis = redis.host(redis_host);
        }
        if let Some(redis_port) = std::env::var("KF_REDIS_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            redis = redis.port(redis_port);
        }
        if let Ok(redis_password) = std::env::var("KF_REDIS_PASSWORD") {
            redis = redis.password(redis_password);
        }

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            host,
            port,
            database_url,
            db_min_connections,
            db_max_connections,
            token_secret,
            access_token_lifespan,
            refresh_token_lifespan,
            redis,
            log_level,
        })
    }

    /// Creates a configuration for testing.
    #[must_use]
    pub fn for_testing(database_url: &str) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0, // Random port
            database_url: database_url.to_string(),
            db_min_connections: 1,
            db_max_connections: 5,
            token_secret: "test-secret".to_string(),
            access_token_lifespan: 300,
            refresh_token_lifespan: 86_400,
            redis: RedisConfig::new(),
            log_level: "debug".to_string(),
        }
    }

    /// Builds the database pool configuration.
    #[must_use]
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig::new(&self.database_url)
            .min_connections(self.db_min_connections)
            .max_connections(self.db_max_connections)
    }

    /// Builds the token lifetime configuration.
    #[must_use]
    pub const fn token_config(&self) -> TokenConfig {
        TokenConfig {
            access_token_lifespan: self.access_token_lifespan,
            refresh_token_lifespan: self.refresh_token_lifespan,
        }
    }
}
