use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::LinkedAccount;

#[derive(Debug, Clone, thiserror::Error)]
pub enum AccountRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Links between local users and external identity providers.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn exists_for_user(&self, user_id: Uuid) -> Result<bool, AccountRepositoryError>;

    async fn find_by_provider(
        &self,
        provider: &str,
        provider_account_id: &str,
    ) -> Result<Option<LinkedAccount>, AccountRepositoryError>;

    async fn link(
        &self,
        user_id: Uuid,
        provider: &str,
        provider_account_id: &str,
    ) -> Result<LinkedAccount, AccountRepositoryError>;
}
