//! Refresh-token storage provider trait.

use async_trait::async_trait;

use crate::error::StorageResult;

/// Provider for outstanding refresh-token records.
///
/// Records are keyed by the signed token string itself. A record is
/// written once and deleted exactly once, at the moment the token is
/// presented for redemption; it is never updated in place.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// Persists a freshly issued refresh token.
    async fn save(&self, token: &str) -> StorageResult<()>;

    /// Looks up a stored refresh token.
    ///
    /// Returns `None` when the token was never stored or has already been
    /// consumed.
    async fn find(&self, token: &str) -> StorageResult<Option<String>>;

    /// Deletes a refresh token.
    ///
    /// Returns `false` when the record was already gone, which signals a
    /// concurrent redemption to the caller.
    async fn delete(&self, token: &str) -> StorageResult<bool>;
}
