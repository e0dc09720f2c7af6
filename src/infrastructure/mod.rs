//! Infrastructure layer: concrete store implementations.
//!
//! - [`persistence`] - PostgreSQL repositories
//! - [`token_store`] - Embed token stores (Redis, in-memory)

pub mod persistence;
pub mod token_store;
