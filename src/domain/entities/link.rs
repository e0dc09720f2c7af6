//! Referral link entity as read from the relational store.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Opaque identifier of a referral link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LinkId(String);

impl LinkId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A referral link with its conversion counters.
///
/// `sale_amount` is kept in currency minor units. `sales` is a count of
/// conversions, not an amount.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: LinkId,
    pub domain: String,
    pub key: String,
    pub url: String,
    pub short_link: String,
    pub archived: bool,
    pub clicks: i64,
    pub leads: i64,
    pub sales: i64,
    pub sale_amount: i64,
    pub program_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Optional filters applied when counting a workspace's links.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkCountFilter {
    pub domain: Option<String>,
    pub search: Option<String>,
    pub program_id: Option<String>,
    pub show_archived: bool,
}
