use chrono::Utc;
use tracing::{debug, info, warn};

use super::AuthOrchestrator;
use crate::auth::application::domain::entities::TokenKind;
use crate::auth::application::domain::forms::LoginRequest;
use crate::auth::application::domain::outcome::{ActionResult, AuthError, LoginOutcome};
use crate::auth::application::services::SignInProvider;

impl AuthOrchestrator {
    pub(super) async fn login_flow(&self, request: LoginRequest) -> Result<LoginOutcome, AuthError> {
        if let Err(fields) = request.validate() {
            debug!(?fields, "Login rejected by validation");
            return Err(AuthError::validation("Invalid email or password", fields));
        }

        let email = request.email();
        let user = match self.users.find_by_email(&email).await? {
            Some(user) if user.password_hash.is_some() => user,
            _ => return Err(AuthError::not_found("User with this email does not exist")),
        };

        if self.config.require_email_verification && !user.is_email_verified() {
            self.send_link(TokenKind::Verification, &user.email).await?;
            info!(user_id = %user.id, "Login deferred until email is verified");
            return Ok(ActionResult::success("Check your email to verify your account").into());
        }

        if user.is_two_factor_enabled {
            match request.code() {
                None => {
                    self.two_factor.issue(&user).await?;
                    return Ok(ActionResult::two_factor().into());
                }
                Some(code) => self.two_factor.confirm(&user, code, Utc::now()).await?,
            }
        }

        let Some(user) = self.credentials.verify(&email, &request.password).await? else {
            warn!(email = %email, "Login with invalid credentials");
            return Err(AuthError::validation("Invalid email or password", Vec::new()));
        };

        if !self.gate.allow(&SignInProvider::Credentials, &user).await? {
            return Err(AuthError::Authorization("Something went wrong".to_string()));
        }

        let session = self.sessions.mint(&user).await?;
        info!(user_id = %user.id, "User signed in");

        Ok(LoginOutcome::SignedIn {
            session,
            redirect_to: self.config.default_login_redirect.clone(),
        })
    }
}
