//! DTOs for the embed data endpoint.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::EmbedData;
use crate::utils::pretty_url::pretty_url;

/// Printable ASCII without whitespace; tokens are otherwise opaque.
static EMBED_TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\x21-\x7E]+$").expect("valid token regex"));

/// Accent used when a program has no brand color.
pub const DEFAULT_ACCENT_COLOR: &str = "#171717";

/// Query string of `GET /api/embed/{variant}`.
#[derive(Debug, Deserialize, Validate)]
pub struct EmbedQuery {
    #[serde(default)]
    #[validate(length(min = 1, max = 256, message = "Embed token is required"))]
    #[validate(regex(path = *EMBED_TOKEN_REGEX, message = "Embed token has invalid characters"))]
    pub token: String,
}

/// How the embed is presented inside the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedVariant {
    /// Single-panel dashboard.
    Inline,
    /// Tabbed invite/rewards widget.
    Widget,
}

impl FromStr for EmbedVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inline" => Ok(Self::Inline),
            "widget" => Ok(Self::Widget),
            other => Err(format!("Unknown embed variant '{}'", other)),
        }
    }
}

impl fmt::Display for EmbedVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inline => f.write_str("inline"),
            Self::Widget => f.write_str("widget"),
        }
    }
}

/// Embed data plus the presentation values both variants share.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedResponse {
    pub variant: EmbedVariant,
    pub accent_color: String,
    pub pretty_short_link: String,
    #[serde(flatten)]
    pub data: EmbedData,
}

impl EmbedResponse {
    pub fn new(variant: EmbedVariant, data: EmbedData) -> Self {
        let accent_color = data
            .program
            .brand_color
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_ACCENT_COLOR)
            .to_string();

        Self {
            variant,
            accent_color,
            pretty_short_link: pretty_url(&data.link.short_link),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{CommissionType, Link, LinkId, Program};
    use chrono::Utc;

    fn embed_data(brand_color: Option<&str>) -> EmbedData {
        EmbedData {
            program: Program {
                id: "prog_1".to_string(),
                workspace_id: "ws_1".to_string(),
                name: "Acme".to_string(),
                slug: "acme".to_string(),
                brand_color: brand_color.map(str::to_string),
                logo: None,
                commission_type: CommissionType::Percentage,
                commission_amount: 10,
            },
            link: Link {
                id: LinkId::new("link_1"),
                domain: "ref.acme.com".to_string(),
                key: "alice".to_string(),
                url: "https://acme.com".to_string(),
                short_link: "https://ref.acme.com/alice".to_string(),
                archived: false,
                clicks: 1,
                leads: 0,
                sales: 0,
                sale_amount: 0,
                program_id: Some("prog_1".to_string()),
                created_at: Utc::now(),
            },
            has_partner_profile: false,
            earnings: 0.0,
        }
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!("inline".parse::<EmbedVariant>(), Ok(EmbedVariant::Inline));
        assert_eq!("widget".parse::<EmbedVariant>(), Ok(EmbedVariant::Widget));
        assert!("popup".parse::<EmbedVariant>().is_err());
    }

    #[test]
    fn test_accent_color_fallback() {
        let response = EmbedResponse::new(EmbedVariant::Widget, embed_data(None));
        assert_eq!(response.accent_color, DEFAULT_ACCENT_COLOR);

        let response = EmbedResponse::new(EmbedVariant::Widget, embed_data(Some("")));
        assert_eq!(response.accent_color, DEFAULT_ACCENT_COLOR);

        let response = EmbedResponse::new(EmbedVariant::Inline, embed_data(Some("#00ff00")));
        assert_eq!(response.accent_color, "#00ff00");
    }

    #[test]
    fn test_response_flattens_embed_data() {
        let response = EmbedResponse::new(EmbedVariant::Inline, embed_data(None));
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["variant"], "inline");
        assert_eq!(value["prettyShortLink"], "ref.acme.com/alice");
        assert_eq!(value["hasPartnerProfile"], false);
        assert_eq!(value["program"]["commissionType"], "percentage");
        assert_eq!(value["link"]["id"], "link_1");
    }

    #[test]
    fn test_query_validation() {
        assert!(EmbedQuery { token: "tok_abc".to_string() }.validate().is_ok());
        assert!(EmbedQuery { token: String::new() }.validate().is_err());
        assert!(EmbedQuery { token: "has space".to_string() }.validate().is_err());
    }
}
