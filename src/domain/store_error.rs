//! Infrastructure failures of the external stores.
//!
//! A [`StoreError`] means the answer is unknown, never that a record is
//! absent. Absence is reported through `Option` / [`super::entities::EmbedLookup`].

use std::fmt;

/// Which external collaborator failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    KeyValue,
    Relational,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyValue => f.write_str("key-value store"),
            Self::Relational => f.write_str("relational store"),
        }
    }
}

/// Errors raised while talking to the token store or the database.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached or rejected the operation.
    #[error("{store} unavailable: {message}")]
    Unavailable { store: StoreKind, message: String },

    /// The store did not answer within the configured bound.
    #[error("{store} did not respond within {timeout_ms}ms")]
    Timeout { store: StoreKind, timeout_ms: u64 },

    /// A stored record could not be decoded.
    #[error("{store} returned a malformed record: {message}")]
    Corrupt { store: StoreKind, message: String },
}

impl StoreError {
    pub fn unavailable(store: StoreKind, message: impl Into<String>) -> Self {
        Self::Unavailable {
            store,
            message: message.into(),
        }
    }

    pub fn store(&self) -> StoreKind {
        match self {
            Self::Unavailable { store, .. }
            | Self::Timeout { store, .. }
            | Self::Corrupt { store, .. } => *store,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => Self::Corrupt {
                store: StoreKind::Relational,
                message: e.to_string(),
            },
            other => Self::unavailable(StoreKind::Relational, other.to_string()),
        }
    }
}

impl From<redis::RedisError> for StoreError {
    fn from(e: redis::RedisError) -> Self {
        Self::unavailable(StoreKind::KeyValue, e.to_string())
    }
}
