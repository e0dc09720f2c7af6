//! Business logic services for the application layer.

pub mod auth_service;
pub mod embed_service;
pub mod link_service;

pub use auth_service::{AuthService, hash_api_token};
pub use embed_service::{EmbedService, StoreTimeouts, compute_earnings, has_partner_profile};
pub use link_service::LinkService;
