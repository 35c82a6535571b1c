//! Credential storage provider trait.

use async_trait::async_trait;
use kf_model::{Credential, NewCredential};
use uuid::Uuid;

use crate::error::StorageResult;

/// Provider for credential record storage.
///
/// Implementations must be thread-safe and support concurrent access.
/// Username uniqueness is enforced by the store itself (a unique
/// index/constraint), so a concurrent duplicate signup surfaces as
/// [`StorageError::Duplicate`](crate::StorageError::Duplicate) rather
/// than racing a read-then-write check.
///
/// ## Security Note
///
/// Password hashes must never be logged.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Creates a credential record and returns its id.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::Duplicate` if the username is taken.
    async fn create(&self, credential: &NewCredential) -> StorageResult<Uuid>;

    /// Looks up a credential record by username.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if no record matches.
    async fn get_by_username(&self, username: &str) -> StorageResult<Credential>;

    /// Looks up a credential record by id.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if no record matches.
    async fn get_by_id(&self, id: Uuid) -> StorageResult<Credential>;

    /// Replaces the salt and hash of an existing record.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if no record matches `id`.
    async fn update_password(&self, id: Uuid, new_hash: &str, new_salt: &str)
        -> StorageResult<()>;
}
