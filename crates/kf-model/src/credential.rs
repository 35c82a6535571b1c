//! Credential domain model.
//!
//! A credential record is the durable per-username record of salt and
//! password hash. Records are created on signup, have their salt and hash
//! replaced on password change, and are never deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored credential record.
///
/// ## Security Note
///
/// `password_hash` holds an Argon2id hash, never a plaintext password.
/// Implementations must ensure this field is never logged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    /// Unique identifier.
    pub id: Uuid,
    /// Username, unique across all records.
    pub username: String,
    /// Base64-encoded salt used to derive `password_hash`.
    pub salt: String,
    /// Argon2id hash of the password.
    pub password_hash: String,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the salt and hash were last replaced.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a credential record.
#[derive(Debug, Clone)]
pub struct NewCredential {
    /// Username to register.
    pub username: String,
    /// Salt the hash was derived with.
    pub salt: String,
    /// Argon2id hash of the password.
    pub password_hash: String,
}

impl NewCredential {
    /// Creates a new credential input.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        salt: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            salt: salt.into(),
            password_hash: password_hash.into(),
        }
    }

    /// Materializes a full record with a fresh id and timestamps.
    #[must_use]
    pub fn into_credential(self) -> Credential {
        let now = Utc::now();
        Credential {
            id: Uuid::now_v7(),
            username: self.username,
            salt: self.salt,
            password_hash: self.password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_credential_materialization() {
        let cred = NewCredential::new("alice", "c2FsdA", "$argon2id$...").into_credential();

        assert_eq!(cred.username, "alice");
        assert_eq!(cred.salt, "c2FsdA");
        assert_eq!(cred.created_at, cred.updated_at);
    }

    #[test]
    fn materialized_ids_are_unique() {
        let a = NewCredential::new("a", "s", "h").into_credential();
        let b = NewCredential::new("a", "s", "h").into_credential();
        assert_ne!(a.id, b.id);
    }
}
