//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::StoreError;
use crate::domain::entities::{
    CommissionType, EnrolledPartner, Link, LinkCountFilter, LinkId, LinkWithRelations, Program,
};
use crate::domain::repositories::LinkRepository;

/// PostgreSQL repository for referral links.
///
/// Queries are bound at runtime; every failure surfaces as a [`StoreError`]
/// so callers can tell an outage apart from a missing row.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn partner_user_ids(&self, partner_id: &str) -> Result<Vec<String>, StoreError> {
        let ids = sqlx::query_scalar::<_, String>(
            r#"
            SELECT user_id
            FROM partner_users
            WHERE partner_id = $1
            ORDER BY created_at, user_id
            "#,
        )
        .bind(partner_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(ids)
    }
}

#[derive(sqlx::FromRow)]
struct LinkRelationsRow {
    id: String,
    domain: String,
    key: String,
    url: String,
    short_link: String,
    archived: bool,
    clicks: i64,
    leads: i64,
    sales: i64,
    sale_amount: i64,
    program_id: Option<String>,
    created_at: DateTime<Utc>,
    joined_program_id: Option<String>,
    program_workspace_id: Option<String>,
    program_name: Option<String>,
    program_slug: Option<String>,
    program_brand_color: Option<String>,
    program_logo: Option<String>,
    program_commission_type: Option<String>,
    program_commission_amount: Option<i32>,
    partner_id: Option<String>,
}

impl LinkRelationsRow {
    fn split(self) -> (Link, Option<Program>, Option<String>) {
        let program = self.joined_program_id.map(|id| Program {
            id,
            workspace_id: self.program_workspace_id.unwrap_or_default(),
            name: self.program_name.unwrap_or_default(),
            slug: self.program_slug.unwrap_or_default(),
            brand_color: self.program_brand_color,
            logo: self.program_logo,
            commission_type: CommissionType::from_db(
                self.program_commission_type.as_deref().unwrap_or_default(),
            ),
            commission_amount: self.program_commission_amount.unwrap_or_default(),
        });

        let link = Link {
            id: LinkId::new(self.id),
            domain: self.domain,
            key: self.key,
            url: self.url,
            short_link: self.short_link,
            archived: self.archived,
            clicks: self.clicks,
            leads: self.leads,
            sales: self.sales,
            sale_amount: self.sale_amount,
            program_id: self.program_id,
            created_at: self.created_at,
        };

        (link, program, self.partner_id)
    }
}

/// Escapes `LIKE` wildcards so user input matches literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn find_with_relations(
        &self,
        id: &LinkId,
    ) -> Result<Option<LinkWithRelations>, StoreError> {
        let row = sqlx::query_as::<_, LinkRelationsRow>(
            r#"
            SELECT
                l.id, l.domain, l.key, l.url, l.short_link, l.archived,
                l.clicks, l.leads, l.sales, l.sale_amount, l.program_id, l.created_at,
                p.id                AS joined_program_id,
                p.workspace_id      AS program_workspace_id,
                p.name              AS program_name,
                p.slug              AS program_slug,
                p.brand_color       AS program_brand_color,
                p.logo              AS program_logo,
                p.commission_type   AS program_commission_type,
                p.commission_amount AS program_commission_amount,
                e.partner_id
            FROM links l
            LEFT JOIN programs p ON p.id = l.program_id
            LEFT JOIN program_enrollments e ON e.link_id = l.id
            WHERE l.id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(self.pool.as_ref())
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let (link, program, partner_id) = row.split();

        let enrollment = match partner_id {
            Some(partner_id) => {
                let user_ids = self.partner_user_ids(&partner_id).await?;
                Some(EnrolledPartner {
                    partner_id,
                    user_ids,
                })
            }
            None => None,
        };

        Ok(Some(LinkWithRelations {
            link,
            program,
            enrollment,
        }))
    }

    async fn count(
        &self,
        workspace_id: &str,
        filter: LinkCountFilter,
    ) -> Result<i64, StoreError> {
        let search = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(escape_like);

        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM links
            WHERE workspace_id = $1
              AND ($2::text IS NULL OR domain = $2)
              AND ($3::text IS NULL OR program_id = $3)
              AND ($4::text IS NULL
                   OR url ILIKE '%' || $4 || '%'
                   OR short_link ILIKE '%' || $4 || '%')
              AND ($5 OR archived = FALSE)
            "#,
        )
        .bind(workspace_id)
        .bind(filter.domain)
        .bind(filter.program_id)
        .bind(search)
        .bind(filter.show_archived)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn health_check(&self) -> bool {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("alice"), "alice");
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }
}
