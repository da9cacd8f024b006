use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::TwoFactorConfirmation;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfirmationRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait TwoFactorConfirmationRepository: Send + Sync {
    async fn find_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<TwoFactorConfirmation>, ConfirmationRepositoryError>;

    /// Swaps any prior confirmation for a fresh one in a single statement.
    async fn replace_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<TwoFactorConfirmation, ConfirmationRepositoryError>;

    /// Deletes the user's confirmation. `true` only for the caller that removed it.
    async fn delete_for_user(&self, user_id: Uuid) -> Result<bool, ConfirmationRepositoryError>;
}
