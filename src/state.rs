//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{AuthService, EmbedService, LinkService, StoreTimeouts};
use crate::domain::repositories::EmbedTokenStore;
use crate::infrastructure::persistence::{PgApiTokenRepository, PgLinkRepository};

#[derive(Clone)]
pub struct AppState {
    pub embed_service: Arc<EmbedService<PgLinkRepository>>,
    pub link_service: Arc<LinkService<PgLinkRepository>>,
    pub auth_service: Arc<AuthService<PgApiTokenRepository>>,
}

impl AppState {
    /// Wires services over a database pool and an embed token store.
    pub fn new(
        pool: Arc<PgPool>,
        token_store: Arc<dyn EmbedTokenStore>,
        timeouts: StoreTimeouts,
        token_signing_secret: String,
    ) -> Self {
        let link_repository = Arc::new(PgLinkRepository::new(pool.clone()));
        let api_token_repository = Arc::new(PgApiTokenRepository::new(pool));

        Self {
            embed_service: Arc::new(EmbedService::new(
                token_store,
                link_repository.clone(),
                timeouts,
            )),
            link_service: Arc::new(LinkService::new(link_repository)),
            auth_service: Arc::new(AuthService::new(
                api_token_repository,
                token_signing_secret,
            )),
        }
    }
}
