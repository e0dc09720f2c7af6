//! Key-value store holding embed tokens.

use async_trait::async_trait;

use crate::domain::store_error::StoreError;

/// Read access to the key-value store where embed tokens live.
///
/// Entries expire according to the store's own policy; an expired entry
/// reads exactly like a missing one.
///
/// # Implementations
///
/// - [`crate::infrastructure::token_store::RedisEmbedTokenStore`] - Redis with TTLs
/// - [`crate::infrastructure::token_store::MemoryEmbedTokenStore`] - in-process map
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbedTokenStore: Send + Sync {
    /// Returns the raw value stored for an embed token.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` if the token is present and not expired
    /// - `Ok(None)` if the token is unknown or expired
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] when the store cannot be reached.
    /// Implementations must not turn connectivity failures into `Ok(None)`.
    async fn get(&self, token: &str) -> Result<Option<String>, StoreError>;

    /// Checks if the store backend is reachable.
    async fn health_check(&self) -> bool;
}
