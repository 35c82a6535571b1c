//! Row types mapped from the database schema.

use chrono::{DateTime, Utc};
use kf_model::Credential;
use sqlx::FromRow;
use uuid::Uuid;

/// A row of the `credentials` table.
#[derive(Debug, FromRow)]
pub struct CredentialRow {
    /// Unique identifier.
    pub id: Uuid,
    /// Unique username.
    pub username: String,
    /// Base64-encoded salt.
    pub salt: String,
    /// Argon2id password hash.
    pub password_hash: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last salt/hash replacement timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<CredentialRow> for Credential {
    fn from(row: CredentialRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            salt: row.salt,
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
