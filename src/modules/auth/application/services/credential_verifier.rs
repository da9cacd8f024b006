use std::sync::Arc;
use tracing::warn;

use crate::auth::application::domain::entities::User;
use crate::auth::application::ports::outgoing::{
    HashError, PasswordHasher, UserQuery, UserQueryError,
};

#[derive(Debug, Clone, thiserror::Error)]
pub enum CredentialError {
    #[error("User lookup failed: {0}")]
    Query(#[from] UserQueryError),

    #[error("Password check could not run: {0}")]
    Hasher(HashError),
}

/// Email + password check. Fails closed: any doubt yields `None`.
#[derive(Clone)]
pub struct CredentialVerifier {
    users: Arc<dyn UserQuery + Send + Sync>,
    hasher: Arc<dyn PasswordHasher + Send + Sync>,
}

impl CredentialVerifier {
    pub fn new(
        users: Arc<dyn UserQuery + Send + Sync>,
        hasher: Arc<dyn PasswordHasher + Send + Sync>,
    ) -> Self {
        Self { users, hasher }
    }

    pub async fn verify(&self, email: &str, password: &str) -> Result<Option<User>, CredentialError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            return Ok(None);
        };

        // OAuth-only accounts have no password to compare against
        let Some(hash) = user.password_hash.as_deref() else {
            return Ok(None);
        };

        match self.hasher.verify_password(password, hash).await {
            Ok(true) => Ok(Some(user)),
            Ok(false) => Ok(None),
            Err(HashError::VerifyFailed) => {
                warn!(user_id = %user.id, "Stored password hash is unreadable");
                Ok(None)
            }
            Err(e) => Err(CredentialError::Hasher(e)),
        }
    }
}
