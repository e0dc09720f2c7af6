//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod embed;
pub mod health;
pub mod links_count;

pub use embed::embed_handler;
pub use health::health_handler;
pub use links_count::links_count_handler;
