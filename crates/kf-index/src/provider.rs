//! Active-token index provider trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::IndexResult;

/// Per-user set of currently-live access-token strings.
///
/// The set supports concurrent additive/subtractive updates without a
/// read-modify-write of the whole value: `add_child` and `remove_child`
/// are independently atomic at the store level. Membership order is
/// irrelevant.
#[async_trait]
pub trait ActiveTokenIndex: Send + Sync {
    /// Returns every live token for the user.
    async fn get(&self, user_id: Uuid) -> IndexResult<Vec<String>>;

    /// Adds a token to the user's set. Idempotent; once added the token
    /// becomes revocable.
    async fn add_child(&self, user_id: Uuid, token: &str) -> IndexResult<()>;

    /// Removes a token from the user's set. Removing an absent token is
    /// not an error.
    async fn remove_child(&self, user_id: Uuid, token: &str) -> IndexResult<()>;

    /// Removes every token for the user (password change, forced
    /// logout-all).
    async fn remove_all(&self, user_id: Uuid) -> IndexResult<()>;
}
