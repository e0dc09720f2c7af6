//! Embed token resolution and partner dashboard assembly.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::domain::entities::{
    CommissionType, EmbedData, EmbedLookup, EnrolledPartner, Link, LinkId, NotFoundReason, Program,
};
use crate::domain::repositories::{EmbedTokenStore, LinkRepository};
use crate::domain::{StoreError, StoreKind};

/// Upper bounds for each store round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreTimeouts {
    pub key_value: Duration,
    pub relational: Duration,
}

impl Default for StoreTimeouts {
    fn default() -> Self {
        Self {
            key_value: Duration::from_millis(500),
            relational: Duration::from_millis(2000),
        }
    }
}

/// Service turning an embed token into the data behind a partner's
/// embedded referral dashboard.
///
/// Both stores are injected; the service holds no state between calls and
/// every operation is read-only.
pub struct EmbedService<L: LinkRepository> {
    token_store: Arc<dyn EmbedTokenStore>,
    link_repository: Arc<L>,
    timeouts: StoreTimeouts,
}

impl<L: LinkRepository> EmbedService<L> {
    /// Creates a new embed service.
    pub fn new(
        token_store: Arc<dyn EmbedTokenStore>,
        link_repository: Arc<L>,
        timeouts: StoreTimeouts,
    ) -> Self {
        Self {
            token_store,
            link_repository,
            timeouts,
        }
    }

    /// Resolves an embed token to the link it grants access to.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(id))` when the token is known and not expired
    /// - `Ok(None)` when the token is empty, unknown or expired
    ///
    /// The token is looked up exactly as given.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the key-value store fails or times out.
    pub async fn resolve(&self, token: &str) -> Result<Option<LinkId>, StoreError> {
        if token.is_empty() {
            return Ok(None);
        }

        let raw = bounded(
            StoreKind::KeyValue,
            self.timeouts.key_value,
            self.token_store.get(token),
        )
        .await?;

        Ok(raw.as_deref().and_then(parse_link_id))
    }

    /// Loads a link with its program and enrollment and derives the
    /// dashboard values.
    ///
    /// A missing link and a link without a program are both
    /// [`EmbedLookup::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the relational store fails or times out.
    pub async fn assemble(&self, link_id: &LinkId) -> Result<EmbedLookup, StoreError> {
        let found = bounded(
            StoreKind::Relational,
            self.timeouts.relational,
            self.link_repository.find_with_relations(link_id),
        )
        .await?;

        let Some(found) = found else {
            return Ok(EmbedLookup::NotFound(NotFoundReason::LinkNotFound));
        };

        let Some(program) = found.program else {
            return Ok(EmbedLookup::NotFound(NotFoundReason::ProgramMissing));
        };

        let earnings = compute_earnings(&found.link, &program);
        let has_partner_profile = has_partner_profile(found.enrollment.as_ref());

        Ok(EmbedLookup::Found(Box::new(EmbedData {
            program,
            link: found.link,
            has_partner_profile,
            earnings,
        })))
    }

    /// Resolves a token and assembles its embed data.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] from either store unchanged; it is never folded
    /// into [`EmbedLookup::NotFound`].
    pub async fn get_embed_data(&self, token: &str) -> Result<EmbedLookup, StoreError> {
        let result = match self.resolve(token).await {
            Ok(Some(link_id)) => self.assemble(&link_id).await,
            Ok(None) => Ok(EmbedLookup::NotFound(NotFoundReason::TokenNotFound)),
            Err(e) => Err(e),
        };

        let outcome = match &result {
            Ok(EmbedLookup::Found(data)) => {
                debug!(link_id = %data.link.id, "Embed resolved");
                "found"
            }
            Ok(EmbedLookup::NotFound(reason)) => {
                info!(reason = reason.as_str(), "Embed not found");
                reason.as_str()
            }
            Err(e) => {
                warn!(error = %e, "Embed lookup failed");
                "store_unavailable"
            }
        };
        metrics::counter!("embed_lookups_total", "outcome" => outcome).increment(1);

        result
    }

    /// Reports whether the token store answers.
    pub async fn token_store_healthy(&self) -> bool {
        self.token_store.health_check().await
    }
}

/// Partner earnings for a link under its program's commission policy.
///
/// - percentage: `sale_amount * commission_amount / 100`
/// - flat: `sales * commission_amount / 100`
///
/// NOTE: the flat branch scales the sale *count* by the commission amount
/// over 100. This matches the dashboard figures partners already see;
/// confirm the intended flat-rate semantics before changing it.
pub fn compute_earnings(link: &Link, program: &Program) -> f64 {
    let base = match program.commission_type {
        CommissionType::Percentage => link.sale_amount,
        CommissionType::Flat => link.sales,
    };

    base as f64 * (f64::from(program.commission_amount) / 100.0)
}

/// True when the link's partner is enrolled and has at least one user.
pub fn has_partner_profile(enrollment: Option<&EnrolledPartner>) -> bool {
    enrollment.is_some_and(EnrolledPartner::has_users)
}

/// Extracts a link id from a stored token value.
///
/// Values may be stored bare (`link_abc`) or JSON-encoded (`"link_abc"`).
fn parse_link_id(raw: &str) -> Option<LinkId> {
    let raw = raw.trim();

    let id = if raw.starts_with('"') {
        serde_json::from_str::<String>(raw).unwrap_or_else(|_| raw.to_string())
    } else {
        raw.to_string()
    };

    let id = id.trim();
    (!id.is_empty()).then(|| LinkId::new(id))
}

async fn bounded<T>(
    store: StoreKind,
    limit: Duration,
    fut: impl Future<Output = Result<T, StoreError>>,
) -> Result<T, StoreError> {
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout {
            store,
            timeout_ms: limit.as_millis() as u64,
        }),
    }
}
