//! API route configuration.

use crate::api::handlers::{embed_handler, links_count_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Public embed routes; access is granted by the embed token itself.
///
/// # Endpoints
///
/// - `GET /embed/{variant}?token=...` - Embed data for the `inline` or `widget` variant
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/embed/{variant}", get(embed_handler))
}

/// Routes requiring a workspace API token via
/// [`crate::api::middleware::auth`].
///
/// # Endpoints
///
/// - `GET /links/count` - Number of links in the token's workspace
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/links/count", get(links_count_handler))
}
