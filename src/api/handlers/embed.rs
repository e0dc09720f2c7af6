//! Handler for embed data lookups.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::embed::{EmbedQuery, EmbedResponse, EmbedVariant};
use crate::domain::entities::EmbedLookup;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the data behind an embedded referral dashboard.
///
/// # Endpoint
///
/// `GET /api/embed/{variant}?token=<embed token>`
///
/// `variant` is `inline` or `widget`; both receive the same data.
///
/// # Response
///
/// ```json
/// {
///   "variant": "widget",
///   "accentColor": "#171717",
///   "prettyShortLink": "ref.acme.com/alice",
///   "program": { "id": "prog_1", "name": "Acme", "commissionType": "percentage", ... },
///   "link": { "id": "link_1", "clicks": 120, "leads": 14, "sales": 5, ... },
///   "hasPartnerProfile": true,
///   "earnings": 2000.0
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request for an unknown variant or a missing/invalid token
/// - 404 Not Found when the token, its link, or the link's program is missing
/// - 503 Service Unavailable when the token store or database fails
pub async fn embed_handler(
    Path(variant): Path<String>,
    Query(query): Query<EmbedQuery>,
    State(state): State<AppState>,
) -> Result<Json<EmbedResponse>, AppError> {
    let variant: EmbedVariant = variant
        .parse()
        .map_err(|reason: String| AppError::bad_request(reason, json!({ "variant": variant })))?;

    query.validate()?;

    match state.embed_service.get_embed_data(&query.token).await? {
        EmbedLookup::Found(data) => Ok(Json(EmbedResponse::new(variant, *data))),
        EmbedLookup::NotFound(_) => Err(AppError::not_found(
            "This embed link is invalid",
            json!({}),
        )),
    }
}
