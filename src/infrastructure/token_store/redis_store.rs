//! Redis-backed embed token store.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info, warn};

use crate::domain::repositories::EmbedTokenStore;
use crate::domain::{StoreError, StoreKind};

/// Embed token lookups against Redis.
///
/// Uses `ConnectionManager` for connection reuse and automatic reconnects.
/// Errors propagate to the caller: a Redis outage must never read as an
/// unknown token.
pub struct RedisEmbedTokenStore {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisEmbedTokenStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `key_prefix` - namespace prepended to every token (e.g., `"embed:token:"`)
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(
        redis_url: &str,
        key_prefix: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let client = Client::open(redis_url).map_err(|e| {
            StoreError::unavailable(
                StoreKind::KeyValue,
                format!("Failed to create Redis client: {}", e),
            )
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            StoreError::unavailable(
                StoreKind::KeyValue,
                format!("Failed to connect to Redis: {}", e),
            )
        })?;

        let mut test_conn = manager.clone();
        test_conn.ping::<()>().await.map_err(|e| {
            StoreError::unavailable(StoreKind::KeyValue, format!("Redis PING failed: {}", e))
        })?;

        info!("Connected to Redis token store");

        Ok(Self {
            client: manager,
            key_prefix: key_prefix.into(),
        })
    }

    fn build_key(&self, token: &str) -> String {
        format!("{}{}", self.key_prefix, token)
    }
}

#[async_trait]
impl EmbedTokenStore for RedisEmbedTokenStore {
    async fn get(&self, token: &str) -> Result<Option<String>, StoreError> {
        let key = self.build_key(token);
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(&key).await {
            Ok(value) => {
                debug!(hit = value.is_some(), "Embed token lookup");
                Ok(value)
            }
            Err(e) => {
                warn!("Redis GET error for embed token: {}", e);
                Err(e.into())
            }
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
