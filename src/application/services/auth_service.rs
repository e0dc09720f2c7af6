//! Authentication service for workspace API tokens.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::repositories::ApiTokenRepository;
use crate::error::AppError;
use serde_json::json;
use tracing::warn;

type HmacSha256 = Hmac<Sha256>;

/// Hashes a raw API token with HMAC-SHA256 keyed by `signing_secret`.
///
/// Returns a 64-character lowercase hex-encoded MAC. Shared with the
/// `admin` binary so that tokens it creates authenticate here.
pub fn hash_api_token(signing_secret: &str, token: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(signing_secret.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(token.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Service authenticating API requests via Bearer tokens.
///
/// A database dump alone cannot be used to forge or verify tokens without the
/// server-side secret.
pub struct AuthService<R: ApiTokenRepository> {
    repository: Arc<R>,
    signing_secret: String,
}

impl<R: ApiTokenRepository> AuthService<R> {
    /// Creates a new authentication service.
    ///
    /// `signing_secret` must match the value used when tokens were created.
    pub fn new(repository: Arc<R>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    /// Authenticates a raw token and returns the workspace it belongs to.
    ///
    /// Updates `last_used_at` on success; a failure to do so is logged and
    /// does not reject the request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown or revoked.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn authenticate(&self, token: &str) -> Result<String, AppError> {
        let token_hash = hash_api_token(&self.signing_secret, token);

        let Some(api_token) = self.repository.find_active_by_hash(&token_hash).await? else {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Invalid or revoked token"}),
            ));
        };

        if let Err(e) = self.repository.update_last_used(&token_hash).await {
            warn!(token_id = api_token.id, "Failed to update token last_used_at: {}", e);
        }

        Ok(api_token.workspace_id)
    }
}
