//! Handler for the links count endpoint.

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::links_count::LinksCountQuery;
use crate::api::middleware::auth::AuthenticatedWorkspace;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the number of links in the authenticated workspace.
///
/// # Endpoint
///
/// `GET /api/links/count`
///
/// # Query Parameters
///
/// - `workspaceId` - optional; must equal the token's workspace
/// - `domain` - exact domain match
/// - `search` - case-insensitive substring of the destination or short link
/// - `programId` - only links of this program
/// - `showArchived` - include archived links (default: `false`)
///
/// # Errors
///
/// - 400 Bad Request if validation fails
/// - 403 Forbidden if `workspaceId` names another workspace
/// - 503 Service Unavailable on database errors
pub async fn links_count_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedWorkspace(workspace_id)): Extension<AuthenticatedWorkspace>,
    Query(query): Query<LinksCountQuery>,
) -> Result<Json<i64>, AppError> {
    query.validate()?;

    if let Some(requested) = query.workspace_id.as_deref()
        && requested != workspace_id
    {
        return Err(AppError::forbidden(
            "API token does not belong to this workspace",
            json!({ "workspaceId": requested }),
        ));
    }

    let count = state
        .link_service
        .count_links(&workspace_id, query.into_filter())
        .await?;

    Ok(Json(count))
}
