use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Errors that can occur in revocation store operations
#[derive(Debug, Clone)]
pub enum RevocationError {
    DatabaseError(String),
    AlreadyExpired,
}

impl std::fmt::Display for RevocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RevocationError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            RevocationError::AlreadyExpired => write!(f, "Token already expired"),
        }
    }
}

impl std::error::Error for RevocationError {}

/// Sessions signed out before their natural expiry, keyed by token hash.
#[async_trait]
pub trait SessionRevocationStore: Send + Sync {
    /// Remember `session_key` as revoked until `expires_at`.
    async fn revoke(
        &self,
        session_key: String,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), RevocationError>;

    async fn is_revoked(&self, session_key: &str) -> Result<bool, RevocationError>;
}
