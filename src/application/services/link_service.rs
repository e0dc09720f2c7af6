//! Workspace link queries.

use std::sync::Arc;

use crate::domain::entities::LinkCountFilter;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Service answering link queries for an authenticated workspace.
pub struct LinkService<L: LinkRepository> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// Counts the workspace's links matching `filter`.
    ///
    /// Blank `domain`, `search` and `program_id` values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ServiceUnavailable`] on database errors.
    pub async fn count_links(
        &self,
        workspace_id: &str,
        filter: LinkCountFilter,
    ) -> Result<i64, AppError> {
        let filter = LinkCountFilter {
            domain: non_blank(filter.domain),
            search: non_blank(filter.search),
            program_id: non_blank(filter.program_id),
            show_archived: filter.show_archived,
        };

        Ok(self.link_repository.count(workspace_id, filter).await?)
    }

    /// Checks database connectivity.
    pub async fn database_healthy(&self) -> bool {
        self.link_repository.health_check().await
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
