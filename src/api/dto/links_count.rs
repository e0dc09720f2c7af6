//! Query parameters for the links count endpoint.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

use crate::domain::entities::LinkCountFilter;

/// `GET /api/links/count` query string.
///
/// `showArchived` is parsed from its string form via `serde_with`.
#[serde_as]
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LinksCountQuery {
    /// Must match the workspace of the API token when present.
    pub workspace_id: Option<String>,

    #[validate(length(max = 190))]
    pub domain: Option<String>,

    #[validate(length(max = 200))]
    pub search: Option<String>,

    pub program_id: Option<String>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub show_archived: Option<bool>,
}

impl LinksCountQuery {
    pub fn into_filter(self) -> LinkCountFilter {
        LinkCountFilter {
            domain: self.domain,
            search: self.search,
            program_id: self.program_id,
            show_archived: self.show_archived.unwrap_or(false),
        }
    }
}
