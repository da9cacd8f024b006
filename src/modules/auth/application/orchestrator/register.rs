use tracing::{debug, info};

use super::AuthOrchestrator;
use crate::auth::application::domain::entities::{NewUser, TokenKind, UserRole};
use crate::auth::application::domain::forms::RegisterRequest;
use crate::auth::application::domain::outcome::{ActionResult, AuthError};
use crate::auth::application::ports::outgoing::UserRepositoryError;

impl AuthOrchestrator {
    pub(super) async fn register_flow(&self, request: RegisterRequest) -> Result<ActionResult, AuthError> {
        if let Err(fields) = request.validate() {
            debug!(?fields, "Registration rejected by validation");
            return Err(AuthError::validation("Invalid email or password", fields));
        }

        let email = request.email();
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AuthError::Conflict("User already exists".to_string()));
        }

        let password_hash = self.hasher.hash_password(&request.password).await?;

        let user = self
            .user_repository
            .create_user(NewUser {
                name: Some(request.name.trim().to_string()),
                email,
                password_hash: Some(password_hash),
                role: UserRole::User,
                email_verified: None,
                image: None,
            })
            .await
            .map_err(|e| match e {
                // Lost a race with a concurrent sign-up for the same address
                UserRepositoryError::UserAlreadyExists => {
                    AuthError::Conflict("User already exists".to_string())
                }
                other => other.into(),
            })?;

        self.send_link(TokenKind::Verification, &user.email).await?;

        info!(user_id = %user.id, "User registered");
        Ok(ActionResult::success("User created successfully"))
    }
}
