//! Embed lookup records: what the relational store returns for a link, and
//! what the embed widget is rendered from.

use serde::Serialize;

use super::link::Link;
use super::program::{EnrolledPartner, Program};

/// A link loaded together with its program and enrollment.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkWithRelations {
    pub link: Link,
    pub program: Option<Program>,
    pub enrollment: Option<EnrolledPartner>,
}

/// Data backing a partner's embedded referral dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedData {
    pub program: Program,
    pub link: Link,
    pub has_partner_profile: bool,
    pub earnings: f64,
}

/// Why an embed lookup produced nothing.
///
/// Callers treat every reason the same way; the distinction only feeds
/// logs and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    TokenNotFound,
    LinkNotFound,
    ProgramMissing,
}

impl NotFoundReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TokenNotFound => "token_not_found",
            Self::LinkNotFound => "link_not_found",
            Self::ProgramMissing => "program_missing",
        }
    }
}

/// Outcome of resolving an embed.
#[derive(Debug, Clone, PartialEq)]
pub enum EmbedLookup {
    Found(Box<EmbedData>),
    NotFound(NotFoundReason),
}

impl EmbedLookup {
    /// Converts into an `Option`, discarding the not-found reason.
    pub fn found(self) -> Option<EmbedData> {
        match self {
            Self::Found(data) => Some(*data),
            Self::NotFound(_) => None,
        }
    }
}
