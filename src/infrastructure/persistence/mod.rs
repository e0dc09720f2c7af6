//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with
//! runtime-bound queries.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Referral links with program and enrollment joins
//! - [`PgApiTokenRepository`] - Workspace API token storage and validation

pub mod pg_api_token_repository;
pub mod pg_link_repository;

pub use pg_api_token_repository::PgApiTokenRepository;
pub use pg_link_repository::PgLinkRepository;
