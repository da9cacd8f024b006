use chrono::Utc;
use tracing::{debug, info, warn};

use super::AuthOrchestrator;
use crate::auth::application::domain::entities::TokenKind;
use crate::auth::application::domain::forms::{NewPasswordRequest, ResetEmailRequest};
use crate::auth::application::domain::outcome::{ActionResult, AuthError};
use crate::shared::validation::FieldError;

impl AuthOrchestrator {
    pub(super) async fn request_reset_flow(
        &self,
        request: ResetEmailRequest,
    ) -> Result<ActionResult, AuthError> {
        if let Err(fields) = request.validate() {
            debug!(?fields, "Reset request rejected by validation");
            return Err(AuthError::validation("Invalid email", fields));
        }

        let email = request.email();
        let Some(user) = self.users.find_by_email(&email).await? else {
            return Err(AuthError::not_found("Email not found"));
        };

        self.send_link(TokenKind::PasswordReset, &user.email).await?;

        info!(user_id = %user.id, "Password reset requested");
        Ok(ActionResult::success("Email successfully sent"))
    }

    pub(super) async fn complete_reset_flow(
        &self,
        token: Option<String>,
        request: NewPasswordRequest,
    ) -> Result<ActionResult, AuthError> {
        let Some(token) = token.filter(|t| !t.trim().is_empty()) else {
            return Err(AuthError::validation(
                "Missing token",
                vec![FieldError::new("token", "Missing token")],
            ));
        };

        if let Err(fields) = request.validate() {
            debug!(?fields, "New password rejected by validation");
            return Err(AuthError::validation("Invalid fields", fields));
        }

        let Some(stored) = self
            .tokens
            .find_by_token(TokenKind::PasswordReset, token.trim())
            .await?
        else {
            return Err(AuthError::not_found("Invalid token"));
        };

        // Left in place: the user asks for a new one.
        if stored.is_expired_at(Utc::now()) {
            warn!(email = %stored.email, "Expired password reset token used");
            return Err(AuthError::expired("Token has expired"));
        }

        let Some(user) = self.users.find_by_email(&stored.email).await? else {
            return Err(AuthError::not_found("User does not exist"));
        };

        let password_hash = self.hasher.hash_password(&request.password).await?;
        self.user_repository
            .update_password(user.id, password_hash)
            .await?;
        self.tokens.consume(TokenKind::PasswordReset, stored.id).await?;

        info!(user_id = %user.id, "Password reset completed");
        Ok(ActionResult::success("Password successfully updated"))
    }
}
