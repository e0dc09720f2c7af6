//! Repository trait for referral link data access.

use crate::domain::entities::{LinkCountFilter, LinkId, LinkWithRelations};
use crate::domain::store_error::StoreError;
use async_trait::async_trait;

/// Read-only repository over referral links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Loads a link by id together with its program and, when the link
    /// belongs to a program enrollment, the enrolled partner and its users.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(_))` if the link exists (its program may still be `None`)
    /// - `Ok(None)` if no link has this id
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on database errors.
    async fn find_with_relations(
        &self,
        id: &LinkId,
    ) -> Result<Option<LinkWithRelations>, StoreError>;

    /// Counts a workspace's links matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on database errors.
    async fn count(&self, workspace_id: &str, filter: LinkCountFilter)
    -> Result<i64, StoreError>;

    /// Checks database connectivity.
    async fn health_check(&self) -> bool;
}
