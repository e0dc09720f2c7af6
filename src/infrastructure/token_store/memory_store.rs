//! In-process embed token store.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::StoreError;
use crate::domain::repositories::EmbedTokenStore;

struct Entry {
    value: String,
    expires_at: Option<DateTime<Utc>>,
}

impl Entry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| now >= e)
    }
}

/// A token store kept in process memory.
///
/// Used when Redis is not configured and in tests. Expired entries read as
/// absent and are dropped lazily on the next write.
#[derive(Default)]
pub struct MemoryEmbedTokenStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryEmbedTokenStore {
    pub fn new() -> Self {
        debug!("Using in-memory embed token store");
        Self::default()
    }

    /// Stores `value` under `token`, optionally expiring after `ttl`.
    pub async fn insert(&self, token: &str, value: impl Into<String>, ttl: Option<Duration>) {
        let now = Utc::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| !entry.is_expired(now));
        entries.insert(
            token.to_string(),
            Entry {
                value: value.into(),
                expires_at: ttl.map(|ttl| now + ttl),
            },
        );
    }
}

#[async_trait]
impl EmbedTokenStore for MemoryEmbedTokenStore {
    async fn get(&self, token: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().await;
        let now = Utc::now();

        Ok(entries
            .get(token)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.value.clone()))
    }

    async fn health_check(&self) -> bool {
        true
    }
}
