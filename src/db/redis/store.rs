use redis::AsyncCommands;
use redis::Client;

use crate::db::kv::{KeyValueStore, StoreKey};
use crate::error::AppResult;

/// Creates a Redis client for preference storage
///
/// Connections are opened lazily per operation through the multiplexed
/// async connection.
pub fn create_redis_client(redis_url: &str) -> anyhow::Result<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// Redis-backed key-value store
///
/// Values are stored without expiry: preferences and the onboarding flag must
/// survive across sessions.
#[derive(Clone)]
pub struct RedisStore {
    redis_client: Client,
}

impl RedisStore {
    pub fn new(redis_client: Client) -> Self {
        Self { redis_client }
    }
}

#[async_trait::async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &StoreKey) -> AppResult<Option<String>> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(key.to_string()).await?;
        Ok(value)
    }

    async fn set(&self, key: &StoreKey, value: String) -> AppResult<()> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let _: () = conn.set(key.to_string(), value).await?;
        tracing::debug!(key = %key, "Wrote key to Redis");
        Ok(())
    }

    async fn delete(&self, key: &StoreKey) -> AppResult<()> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let _: () = conn.del(key.to_string()).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}

// These need a live Redis; run with `cargo test -- --ignored` and REDIS_URL set.
