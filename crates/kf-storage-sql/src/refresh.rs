//! `PostgreSQL` implementation of the refresh-token store.

use async_trait::async_trait;
use chrono::Utc;
use kf_storage::error::StorageResult;
use kf_storage::RefreshTokenStore;
use sqlx::PgPool;

use crate::error::from_sqlx_error;

/// `PostgreSQL` refresh-token store.
pub struct PgRefreshTokenStore {
    pool: PgPool,
}

impl PgRefreshTokenStore {
    /// Creates a new `PostgreSQL` refresh-token store.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenStore for PgRefreshTokenStore {
    async fn save(&self, token: &str) -> StorageResult<()> {
        sqlx::query("INSERT INTO refresh_tokens (token, created_at) VALUES ($1, $2)")
            .bind(token)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

        Ok(())
    }

    async fn find(&self, token: &str) -> StorageResult<Option<String>> {
        sqlx::query_scalar("SELECT token FROM refresh_tokens WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(from_sqlx_error)
    }

    async fn delete(&self, token: &str) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}
