//! Repository and store trait definitions for the domain layer.
//!
//! Traits define the contract for data access; implementations live in
//! `crate::infrastructure`. Mock implementations are auto-generated via
//! `mockall` for unit tests.
//!
//! # Available Traits
//!
//! - [`EmbedTokenStore`] - Embed token lookups in the key-value store
//! - [`LinkRepository`] - Referral link reads
//! - [`ApiTokenRepository`] - Workspace API token authentication
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod api_token_repository;
pub mod embed_token_store;
pub mod link_repository;

pub use api_token_repository::{ApiToken, ApiTokenRepository};
pub use embed_token_store::EmbedTokenStore;
pub use link_repository::LinkRepository;

#[cfg(test)]
pub use api_token_repository::MockApiTokenRepository;
#[cfg(test)]
pub use embed_token_store::MockEmbedTokenStore;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
