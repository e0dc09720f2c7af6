//! Embed token storage backends.
//!
//! Provides two [`EmbedTokenStore`](crate::domain::repositories::EmbedTokenStore)
//! implementations:
//! - [`RedisEmbedTokenStore`] - Production Redis store; token expiry via key TTLs
//! - [`MemoryEmbedTokenStore`] - In-process store for development and tests

mod memory_store;
mod redis_store;

pub use memory_store::MemoryEmbedTokenStore;
pub use redis_store::RedisEmbedTokenStore;
