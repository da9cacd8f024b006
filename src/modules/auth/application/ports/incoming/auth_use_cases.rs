use async_trait::async_trait;

use crate::auth::application::domain::entities::OAuthProfile;
use crate::auth::application::domain::forms::{
    LoginRequest, NewPasswordRequest, RegisterRequest, ResetEmailRequest,
};
use crate::auth::application::domain::outcome::{
    ActionResult, IssuedSession, LoginOutcome, UnexpectedError,
};

/// Entry points of the auth flows. User-facing failures come back as
/// `ActionResult::Error`; only faults the caller cannot act on are `Err`.
#[async_trait]
pub trait AuthUseCases: Send + Sync {
    async fn login(&self, request: LoginRequest) -> Result<LoginOutcome, UnexpectedError>;

    async fn register(&self, request: RegisterRequest) -> Result<ActionResult, UnexpectedError>;

    async fn request_password_reset(
        &self,
        request: ResetEmailRequest,
    ) -> Result<ActionResult, UnexpectedError>;

    async fn complete_password_reset(
        &self,
        token: Option<String>,
        request: NewPasswordRequest,
    ) -> Result<ActionResult, UnexpectedError>;

    async fn verify_email(&self, token: &str) -> Result<ActionResult, UnexpectedError>;

    async fn logout(&self, bearer: &str) -> Result<ActionResult, UnexpectedError>;

    /// Called once an identity provider has vouched for `profile`.
    async fn complete_oauth_sign_in(
        &self,
        profile: OAuthProfile,
    ) -> Result<Result<IssuedSession, ActionResult>, UnexpectedError>;
}
