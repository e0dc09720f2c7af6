mod common;

use async_trait::async_trait;
use axum::{Router, http::StatusCode, routing::get};
use axum_test::TestServer;
use chrono::Duration;
use common::LinkFixture;
use partner_embed::api::handlers::embed_handler;
use partner_embed::domain::repositories::EmbedTokenStore;
use partner_embed::domain::{StoreError, StoreKind};
use partner_embed::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;

/// Token store whose backend is unreachable.
struct UnreachableTokenStore;

#[async_trait]
impl EmbedTokenStore for UnreachableTokenStore {
    async fn get(&self, _token: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::unavailable(StoreKind::KeyValue, "connection refused"))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

fn embed_server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/api/embed/{variant}", get(embed_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

async fn seed_program_link(pool: &PgPool, commission_type: &str, amount: i32, color: Option<&str>) {
    common::create_test_program(pool, "prog_1", commission_type, amount, color).await;
    common::create_test_link(
        pool,
        LinkFixture {
            program_id: Some("prog_1"),
            sales: 5,
            sale_amount: 10_000,
            ..LinkFixture::new("link_1", "alice")
        },
    )
    .await;
}

#[sqlx::test]
async fn test_embed_percentage_commission(pool: PgPool) {
    seed_program_link(&pool, "percentage", 20, Some("#ff0000")).await;
    let (state, store) = common::create_test_state(pool);
    store.insert("tok_1", "link_1", None).await;
    let server = embed_server(state);

    let response = server
        .get("/api/embed/widget")
        .add_query_param("token", "tok_1")
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["variant"], "widget");
    assert_eq!(json["earnings"], 2000.0);
    assert_eq!(json["accentColor"], "#ff0000");
    assert_eq!(json["prettyShortLink"], "ref.acme.com/alice");
    assert_eq!(json["hasPartnerProfile"], false);
    assert_eq!(json["program"]["id"], "prog_1");
    assert_eq!(json["program"]["commissionType"], "percentage");
    assert_eq!(json["link"]["id"], "link_1");
    assert_eq!(json["link"]["clicks"], 120);
    assert_eq!(json["link"]["leads"], 14);
    assert_eq!(json["link"]["sales"], 5);
    assert_eq!(json["link"]["saleAmount"], 10_000);
}

#[sqlx::test]
async fn test_embed_flat_commission(pool: PgPool) {
    seed_program_link(&pool, "flat", 500, None).await;
    let (state, store) = common::create_test_state(pool);
    store.insert("tok_1", "link_1", None).await;
    let server = embed_server(state);

    let response = server
        .get("/api/embed/inline")
        .add_query_param("token", "tok_1")
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["variant"], "inline");
    assert_eq!(json["earnings"], 25.0);
    assert_eq!(json["accentColor"], "#171717");
}

#[sqlx::test]
async fn test_embed_partner_profile(pool: PgPool) {
    seed_program_link(&pool, "percentage", 10, None).await;
    common::enroll_partner(&pool, "prog_1", "pn_1", "link_1", &["user_a"]).await;
    let (state, store) = common::create_test_state(pool);
    store.insert("tok_1", "link_1", None).await;
    let server = embed_server(state);

    let response = server
        .get("/api/embed/widget")
        .add_query_param("token", "tok_1")
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["hasPartnerProfile"], true);
}

#[sqlx::test]
async fn test_embed_json_encoded_link_id(pool: PgPool) {
    seed_program_link(&pool, "percentage", 10, None).await;
    let (state, store) = common::create_test_state(pool);
    store.insert("tok_1", "\"link_1\"", None).await;
    let server = embed_server(state);

    let response = server
        .get("/api/embed/widget")
        .add_query_param("token", "tok_1")
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["link"]["id"], "link_1");
    assert_eq!(json["earnings"], 1000.0);
}

#[sqlx::test]
async fn test_embed_unknown_token(pool: PgPool) {
    let (state, _store) = common::create_test_state(pool);
    let server = embed_server(state);

    let response = server
        .get("/api/embed/widget")
        .add_query_param("token", "nope")
        .await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
    assert_eq!(json["error"]["message"], "This embed link is invalid");
}

#[sqlx::test]
async fn test_embed_expired_token(pool: PgPool) {
    seed_program_link(&pool, "percentage", 10, None).await;
    let (state, store) = common::create_test_state(pool);
    store
        .insert("tok_1", "link_1", Some(Duration::seconds(-1)))
        .await;
    let server = embed_server(state);

    let response = server
        .get("/api/embed/widget")
        .add_query_param("token", "tok_1")
        .await;

    response.assert_status_not_found();
}

#[sqlx::test]
async fn test_embed_token_for_missing_link(pool: PgPool) {
    let (state, store) = common::create_test_state(pool);
    store.insert("tok_1", "link_gone", None).await;
    let server = embed_server(state);

    let response = server
        .get("/api/embed/widget")
        .add_query_param("token", "tok_1")
        .await;

    response.assert_status_not_found();
}

#[sqlx::test]
async fn test_embed_link_without_program(pool: PgPool) {
    common::create_test_link(&pool, LinkFixture::new("link_1", "alice")).await;
    let (state, store) = common::create_test_state(pool);
    store.insert("tok_1", "link_1", None).await;
    let server = embed_server(state);

    let response = server
        .get("/api/embed/widget")
        .add_query_param("token", "tok_1")
        .await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["message"], "This embed link is invalid");
}

#[sqlx::test]
async fn test_embed_unknown_variant(pool: PgPool) {
    let (state, store) = common::create_test_state(pool);
    store.insert("tok_1", "link_1", None).await;
    let server = embed_server(state);

    let response = server
        .get("/api/embed/banner")
        .add_query_param("token", "tok_1")
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
}

#[sqlx::test]
async fn test_embed_missing_token(pool: PgPool) {
    let (state, _store) = common::create_test_state(pool);
    let server = embed_server(state);

    let response = server.get("/api/embed/widget").await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
}

#[sqlx::test]
async fn test_embed_token_store_down_is_service_unavailable(pool: PgPool) {
    seed_program_link(&pool, "percentage", 10, None).await;
    let state = common::create_test_state_with_store(pool, Arc::new(UnreachableTokenStore));
    let server = embed_server(state);

    let response = server
        .get("/api/embed/widget")
        .add_query_param("token", "tok_1")
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "service_unavailable");
    assert_eq!(json["error"]["details"]["store"], "key-value store");
}

#[sqlx::test]
async fn test_embed_database_down_is_service_unavailable(pool: PgPool) {
    let closed = pool.clone();
    let (state, store) = common::create_test_state(pool);
    store.insert("tok_1", "link_1", None).await;
    closed.close().await;
    let server = embed_server(state);

    let response = server
        .get("/api/embed/widget")
        .add_query_param("token", "tok_1")
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "service_unavailable");
    assert_eq!(json["error"]["details"]["store"], "relational store");
}
