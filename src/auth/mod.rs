use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use sqlx::{FromRow, PgPool};
use thiserror::Error;
use uuid::Uuid;

/// Identity resolved from a bearer credential, attached to the request for
/// downstream handlers.
#[derive(Debug, Clone, Copy)]
pub struct AuthIdentity {
    pub user_id: Uuid,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("missing authorization header")]
    Missing,

    #[error("{0}")]
    Malformed(String),

    #[error("invalid bearer token")]
    Unknown,

    #[error("bearer token expired")]
    Expired,

    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

/// Token-store collaborator consulted once per request by the auth gate.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn validate(&self, token: &str) -> Result<AuthIdentity, TokenError>;
}

/// Shared state for the auth middleware.
#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<dyn TokenStore>,
}

/// Postgres-backed token store. Tokens are stored as SHA-256 digests, so
/// the presented credential is hashed before lookup.
pub struct PgTokenStore {
    pool: PgPool,
}

const SELECT_TOKEN: &str = "SELECT * FROM get_auth_token($1)";

#[derive(Debug, FromRow)]
struct TokenRow {
    user_id: Uuid,
    expires_at: DateTime<Utc>,
}

impl PgTokenStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenStore for PgTokenStore {
    async fn validate(&self, token: &str) -> Result<AuthIdentity, TokenError> {
        let digest = token_digest(token);

        let row = sqlx::query_as::<_, TokenRow>(SELECT_TOKEN)
            .bind(&digest)
            .fetch_optional(&self.pool)
            .await?;

        let row = row.ok_or(TokenError::Unknown)?;

        if row.expires_at <= Utc::now() {
            return Err(TokenError::Expired);
        }

        Ok(AuthIdentity {
            user_id: row.user_id,
        })
    }
}

/// Hex SHA-256 digest of a bearer credential.
pub fn token_digest(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
