use chrono::Utc;
use tracing::{info, warn};

use super::AuthOrchestrator;
use crate::auth::application::domain::entities::{NewUser, OAuthProfile, User, UserRole};
use crate::auth::application::domain::forms::normalize_email;
use crate::auth::application::domain::outcome::{AuthError, IssuedSession};
use crate::auth::application::services::SignInProvider;

impl AuthOrchestrator {
    /// Finds or creates the user behind a provider identity and signs them in.
    pub(super) async fn oauth_flow(&self, profile: OAuthProfile) -> Result<IssuedSession, AuthError> {
        let email = normalize_email(&profile.email);
        let linked = self
            .accounts
            .find_by_provider(&profile.provider, &profile.provider_account_id)
            .await?;

        let user = match linked {
            Some(account) => self
                .users
                .find_by_id(account.user_id)
                .await?
                .ok_or_else(|| AuthError::not_found("User does not exist"))?,
            None => self.link_new_identity(&profile, &email).await?,
        };

        let provider = SignInProvider::OAuth(profile.provider.clone());
        if !self.gate.allow(&provider, &user).await? {
            return Err(AuthError::Authorization("Something went wrong".to_string()));
        }

        let session = self.sessions.mint(&user).await?;
        info!(user_id = %user.id, provider = %profile.provider, "User signed in with OAuth");
        Ok(session)
    }

    async fn link_new_identity(&self, profile: &OAuthProfile, email: &str) -> Result<User, AuthError> {
        // Never attach a provider to an account someone else may own.
        if let Some(existing) = self.users.find_by_email(email).await? {
            warn!(user_id = %existing.id, provider = %profile.provider, "OAuth email collides with an existing account");
            return Err(AuthError::Conflict(
                "Email already in use with a different provider".to_string(),
            ));
        }

        let user = self
            .user_repository
            .create_user(NewUser {
                name: profile.name.clone(),
                email: email.to_string(),
                password_hash: None,
                role: UserRole::User,
                email_verified: Some(Utc::now()),
                image: profile.image.clone(),
            })
            .await?;

        self.accounts
            .link(user.id, &profile.provider, &profile.provider_account_id)
            .await?;

        info!(user_id = %user.id, provider = %profile.provider, "Provider account linked");
        Ok(user)
    }
}
