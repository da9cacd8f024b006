use std::sync::Arc;
use tracing::{debug, warn};

use crate::auth::application::domain::entities::User;
use crate::auth::application::domain::outcome::AuthError;
use crate::auth::application::ports::outgoing::TwoFactorConfirmationRepository;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInProvider {
    Credentials,
    OAuth(String),
}

/// Last check before a session is minted.
#[derive(Clone)]
pub struct SignInGate {
    confirmations: Arc<dyn TwoFactorConfirmationRepository + Send + Sync>,
}

impl SignInGate {
    pub fn new(confirmations: Arc<dyn TwoFactorConfirmationRepository + Send + Sync>) -> Self {
        Self { confirmations }
    }

    /// Credentials sign-ins of two-factor users need a confirmation, which stays in
    /// place for the session. The next login clears or replaces it.
    pub async fn allow(&self, provider: &SignInProvider, user: &User) -> Result<bool, AuthError> {
        match provider {
            SignInProvider::OAuth(name) => {
                if self.confirmations.delete_for_user(user.id).await? {
                    debug!(user_id = %user.id, "Two-factor confirmation cleared by OAuth sign-in");
                }
                debug!(user_id = %user.id, provider = %name, "OAuth sign-in allowed");
                Ok(true)
            }
            SignInProvider::Credentials if !user.is_two_factor_enabled => Ok(true),
            SignInProvider::Credentials => {
                if self.confirmations.find_by_user(user.id).await?.is_some() {
                    Ok(true)
                } else {
                    warn!(user_id = %user.id, "Sign-in denied: two-factor confirmation missing");
                    Ok(false)
                }
            }
        }
    }
}
