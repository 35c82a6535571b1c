//! `PostgreSQL` implementation of the credential store.

use async_trait::async_trait;
use chrono::Utc;
use kf_model::{Credential, NewCredential};
use kf_storage::error::StorageResult;
use kf_storage::{CredentialStore, StorageError};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::CredentialRow;
use crate::error::{from_sqlx_error, is_unique_violation};

/// `PostgreSQL` credential store.
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    /// Creates a new `PostgreSQL` credential store.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn create(&self, credential: &NewCredential) -> StorageResult<Uuid> {
        let record = credential.clone().into_credential();

        let result = sqlx::query(
            r"INSERT INTO credentials (id, username, salt, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(record.id)
        .bind(&record.username)
        .bind(&record.salt)
        .bind(&record.password_hash)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(record.id),
            Err(e) if is_unique_violation(&e) => Err(StorageError::duplicate(
                "Credential",
                "username",
                &record.username,
            )),
            Err(e) => Err(from_sqlx_error(e)),
        }
    }

    async fn get_by_username(&self, username: &str) -> StorageResult<Credential> {
        let row: Option<CredentialRow> =
            sqlx::query_as("SELECT * FROM credentials WHERE username = $1")
                .bind(username)
                .fetch_optional(&self.pool)
                .await
                .map_err(from_sqlx_error)?;

        row.map(Credential::from)
            .ok_or(StorageError::not_found("Credential"))
    }

    async fn get_by_id(&self, id: Uuid) -> StorageResult<Credential> {
        let row: Option<CredentialRow> = sqlx::query_as("SELECT * FROM credentials WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

        row.map(Credential::from)
            .ok_or(StorageError::not_found("Credential"))
    }

    async fn update_password(
        &self,
        id: Uuid,
        new_hash: &str,
        new_salt: &str,
    ) -> StorageResult<()> {
        let result = sqlx::query(
            "UPDATE credentials SET password_hash = $2, salt = $3, updated_at = $4 WHERE id = $1",
        )
        .bind(id)
        .bind(new_hash)
        .bind(new_salt)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(from_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::not_found("Credential"));
        }

        Ok(())
    }
}
