use async_trait::async_trait;
use chrono::Duration;
use uuid::Uuid;

use crate::auth::application::domain::entities::{AuthToken, TokenKind};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TokenStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Persistence for verification, password reset and two-factor tokens.
///
/// At most one token exists per `(kind, email)`. Expiry is data: the store
/// never rejects or sweeps expired rows, callers compare `expires_at` themselves.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Creates a fresh token, replacing any previous one for the same kind and email
    /// in a single transaction.
    async fn issue(
        &self,
        kind: TokenKind,
        email: &str,
        ttl: Duration,
    ) -> Result<AuthToken, TokenStoreError>;

    async fn find_by_token(
        &self,
        kind: TokenKind,
        token: &str,
    ) -> Result<Option<AuthToken>, TokenStoreError>;

    async fn find_by_email(
        &self,
        kind: TokenKind,
        email: &str,
    ) -> Result<Option<AuthToken>, TokenStoreError>;

    /// Deletes by id. Missing rows are not an error.
    async fn consume(&self, kind: TokenKind, id: Uuid) -> Result<(), TokenStoreError>;
}
