#![allow(dead_code)]

use partner_embed::application::services::{StoreTimeouts, hash_api_token};
use partner_embed::domain::repositories::EmbedTokenStore;
use partner_embed::infrastructure::token_store::MemoryEmbedTokenStore;
use partner_embed::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;

pub const TEST_SECRET: &str = "test-signing-secret";
pub const WORKSPACE: &str = "ws_acme";

pub async fn create_test_program(
    pool: &PgPool,
    id: &str,
    commission_type: &str,
    commission_amount: i32,
    brand_color: Option<&str>,
) {
    sqlx::query(
        "INSERT INTO programs (id, workspace_id, name, slug, brand_color, commission_type, commission_amount)
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(id)
    .bind(WORKSPACE)
    .bind(format!("Program {}", id))
    .bind(format!("slug-{}", id))
    .bind(brand_color)
    .bind(commission_type)
    .bind(commission_amount)
    .execute(pool)
    .await
    .unwrap();
}

/// Columns of a link row inserted by [`create_test_link`].
pub struct LinkFixture<'a> {
    pub id: &'a str,
    pub workspace_id: &'a str,
    pub domain: &'a str,
    pub key: &'a str,
    pub url: &'a str,
    pub program_id: Option<&'a str>,
    pub archived: bool,
    pub sales: i64,
    pub sale_amount: i64,
}

impl<'a> LinkFixture<'a> {
    pub fn new(id: &'a str, key: &'a str) -> Self {
        Self {
            id,
            workspace_id: WORKSPACE,
            domain: "ref.acme.com",
            key,
            url: "https://acme.com/pricing",
            program_id: None,
            archived: false,
            sales: 0,
            sale_amount: 0,
        }
    }
}

pub async fn create_test_link(pool: &PgPool, link: LinkFixture<'_>) {
    sqlx::query(
        "INSERT INTO links (id, workspace_id, domain, key, url, short_link, archived,
                            clicks, leads, sales, sale_amount, program_id)
         VALUES ($1, $2, $3, $4, $5, $6, $7, 120, 14, $8, $9, $10)",
    )
    .bind(link.id)
    .bind(link.workspace_id)
    .bind(link.domain)
    .bind(link.key)
    .bind(link.url)
    .bind(format!("https://{}/{}", link.domain, link.key))
    .bind(link.archived)
    .bind(link.sales)
    .bind(link.sale_amount)
    .bind(link.program_id)
    .execute(pool)
    .await
    .unwrap();
}

/// Enrolls a partner with `user_ids` into `program_id` using `link_id`.
pub async fn enroll_partner(
    pool: &PgPool,
    program_id: &str,
    partner_id: &str,
    link_id: &str,
    user_ids: &[&str],
) {
    sqlx::query("INSERT INTO partners (id, name) VALUES ($1, $2)")
        .bind(partner_id)
        .bind(format!("Partner {}", partner_id))
        .execute(pool)
        .await
        .unwrap();

    for user_id in user_ids {
        sqlx::query("INSERT INTO partner_users (partner_id, user_id) VALUES ($1, $2)")
            .bind(partner_id)
            .bind(user_id)
            .execute(pool)
            .await
            .unwrap();
    }

    sqlx::query(
        "INSERT INTO program_enrollments (id, program_id, partner_id, link_id)
         VALUES ($1, $2, $3, $4)",
    )
    .bind(format!("enr_{}", partner_id))
    .bind(program_id)
    .bind(partner_id)
    .bind(link_id)
    .execute(pool)
    .await
    .unwrap();
}

/// Inserts an API token for `workspace_id` and returns its id.
pub async fn create_api_token(pool: &PgPool, workspace_id: &str, name: &str, raw: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO api_tokens (workspace_id, name, token_hash) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(workspace_id)
    .bind(name)
    .bind(hash_api_token(TEST_SECRET, raw))
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Builds application state over `pool` and an in-memory token store the
/// test can seed.
pub fn create_test_state(pool: PgPool) -> (AppState, Arc<MemoryEmbedTokenStore>) {
    let token_store = Arc::new(MemoryEmbedTokenStore::new());

    let state = AppState::new(
        Arc::new(pool),
        token_store.clone(),
        StoreTimeouts::default(),
        TEST_SECRET.to_string(),
    );

    (state, token_store)
}

/// Builds application state over `pool` and an arbitrary token store.
pub fn create_test_state_with_store(
    pool: PgPool,
    token_store: Arc<dyn EmbedTokenStore>,
) -> AppState {
    AppState::new(
        Arc::new(pool),
        token_store,
        StoreTimeouts::default(),
        TEST_SECRET.to_string(),
    )
}
