//! Application layer services implementing business logic.
//!
//! Services consume repository and store traits and provide a clean API for
//! HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::embed_service::EmbedService`] - Embed token resolution and dashboard assembly
//! - [`services::link_service::LinkService`] - Workspace link counts
//! - [`services::auth_service::AuthService`] - API token authentication

pub mod services;
