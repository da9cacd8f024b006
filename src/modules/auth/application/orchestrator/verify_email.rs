use chrono::Utc;
use tracing::{info, warn};

use super::AuthOrchestrator;
use crate::auth::application::domain::entities::TokenKind;
use crate::auth::application::domain::outcome::{ActionResult, AuthError};

impl AuthOrchestrator {
    pub(super) async fn verify_email_flow(&self, token: &str) -> Result<ActionResult, AuthError> {
        let Some(stored) = self
            .tokens
            .find_by_token(TokenKind::Verification, token.trim())
            .await?
        else {
            return Err(AuthError::not_found("Token does not exist"));
        };

        let now = Utc::now();
        if stored.is_expired_at(now) {
            warn!(email = %stored.email, "Expired verification token used");
            return Err(AuthError::expired("Token has expired"));
        }

        let Some(user) = self.users.find_by_email(&stored.email).await? else {
            return Err(AuthError::not_found("User does not exist"));
        };

        self.user_repository
            .mark_email_verified(user.id, &stored.email, now)
            .await?;
        self.tokens.consume(TokenKind::Verification, stored.id).await?;

        info!(user_id = %user.id, "Email verified");
        Ok(ActionResult::success("Email has been verified"))
    }
}
