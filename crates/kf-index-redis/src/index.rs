//! Redis-backed active-token index.

use async_trait::async_trait;
use fred::prelude::*;
use kf_index::{ActiveTokenIndex, IndexError, IndexResult};
use uuid::Uuid;

use crate::config::RedisConfig;
use crate::error::from_redis_error;

/// Redis-based active-token index.
pub struct RedisTokenIndex {
    client: Client,
    config: RedisConfig,
}

impl RedisTokenIndex {
    /// Connects to Redis and returns a ready index.
    ///
    /// ## Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub async fn connect(config: RedisConfig) -> IndexResult<Self> {
        let redis_config = Config::from_url(&config.connection_url())
            .map_err(|e| IndexError::Configuration(e.to_string()))?;

        let client = Client::new(
            redis_config,
            None,
            None,
            Some(ReconnectPolicy::new_exponential(0, 1000, 30_000, 2)),
        );

        client.init().await.map_err(from_redis_error)?;

        Ok(Self { client, config })
    }

    /// Creates an index around an existing client.
    #[must_use]
    pub const fn new(client: Client, config: RedisConfig) -> Self {
        Self { client, config }
    }

    /// Returns the underlying Redis client.
    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.client
    }

    fn key(&self, user_id: Uuid) -> String {
        self.config.prefixed_key(&format!("tokens:{user_id}"))
    }
}

#[async_trait]
impl ActiveTokenIndex for RedisTokenIndex {
    async fn get(&self, user_id: Uuid) -> IndexResult<Vec<String>> {
        let key = self.key(user_id);
        self.client.smembers(&key).await.map_err(from_redis_error)
    }

    async fn add_child(&self, user_id: Uuid, token: &str) -> IndexResult<()> {
        let key = self.key(user_id);
        self.client
            .sadd::<(), _, _>(&key, token)
            .await
            .map_err(from_redis_error)
    }

    async fn remove_child(&self, user_id: Uuid, token: &str) -> IndexResult<()> {
        let key = self.key(user_id);
        self.client
            .srem::<(), _, _>(&key, token)
            .await
            .map_err(from_redis_error)
    }

    async fn remove_all(&self, user_id: Uuid) -> IndexResult<()> {
        let key = self.key(user_id);
        self.client
            .del::<(), _>(&key)
            .await
            .map_err(from_redis_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_includes_prefix_and_user() {
        let client = Client::new(Config::default(), None, None, None);
        let index = RedisTokenIndex::new(client, RedisConfig::default());

        let user = Uuid::now_v7();
        assert_eq!(index.key(user), format!("kf:tokens:{user}"));
    }
}
