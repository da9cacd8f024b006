mod login;
mod logout;
mod oauth;
mod password_reset;
mod register;
mod verify_email;


use async_trait::async_trait;
use std::sync::Arc;
use tracing::error;

use crate::auth::application::config::AuthConfig;
use crate::auth::application::domain::entities::{OAuthProfile, TokenKind};
use crate::auth::application::domain::forms::{
    LoginRequest, NewPasswordRequest, RegisterRequest, ResetEmailRequest,
};
use crate::auth::application::domain::outcome::{
    ActionResult, AuthError, IssuedSession, LoginOutcome, UnexpectedError,
};
use crate::auth::application::ports::incoming::AuthUseCases;
use crate::auth::application::ports::outgoing::{
    AccountRepository, PasswordHasher, SessionRevocationStore, SessionTokenProvider, TokenStore,
    TwoFactorConfirmationRepository, UserQuery, UserRepository,
};
use crate::auth::application::services::{
    CredentialVerifier, SessionIssuer, SignInGate, TwoFactorChallenge,
};
use crate::email::application::ports::outgoing::{AuthEmailNotifier, MailKind};

/// Everything the orchestrator talks to.
#[derive(Clone)]
pub struct AuthPorts {
    pub users: Arc<dyn UserQuery + Send + Sync>,
    pub user_repository: Arc<dyn UserRepository + Send + Sync>,
    pub accounts: Arc<dyn AccountRepository + Send + Sync>,
    pub tokens: Arc<dyn TokenStore + Send + Sync>,
    pub confirmations: Arc<dyn TwoFactorConfirmationRepository + Send + Sync>,
    pub hasher: Arc<dyn PasswordHasher + Send + Sync>,
    pub notifier: Arc<dyn AuthEmailNotifier + Send + Sync>,
    pub session_tokens: Arc<dyn SessionTokenProvider + Send + Sync>,
    pub revocations: Arc<dyn SessionRevocationStore + Send + Sync>,
}

#[derive(Clone)]
pub struct AuthOrchestrator {
    config: AuthConfig,
    users: Arc<dyn UserQuery + Send + Sync>,
    user_repository: Arc<dyn UserRepository + Send + Sync>,
    accounts: Arc<dyn AccountRepository + Send + Sync>,
    tokens: Arc<dyn TokenStore + Send + Sync>,
    hasher: Arc<dyn PasswordHasher + Send + Sync>,
    notifier: Arc<dyn AuthEmailNotifier + Send + Sync>,
    credentials: CredentialVerifier,
    two_factor: TwoFactorChallenge,
    gate: SignInGate,
    sessions: SessionIssuer,
}

impl AuthOrchestrator {
    pub fn new(config: AuthConfig, ports: AuthPorts) -> Self {
        let credentials = CredentialVerifier::new(ports.users.clone(), ports.hasher.clone());
        let two_factor = TwoFactorChallenge::new(
            ports.tokens.clone(),
            ports.confirmations.clone(),
            ports.notifier.clone(),
            config.two_factor_token_ttl,
        );
        let gate = SignInGate::new(ports.confirmations.clone());
        let sessions = SessionIssuer::new(
            ports.session_tokens,
            ports.revocations,
            ports.users.clone(),
            ports.accounts.clone(),
            config.stale_session_policy,
        );

        Self {
            config,
            users: ports.users,
            user_repository: ports.user_repository,
            accounts: ports.accounts,
            tokens: ports.tokens,
            hasher: ports.hasher,
            notifier: ports.notifier,
            credentials,
            two_factor,
            gate,
            sessions,
        }
    }

    /// The issuer used for minting, shared with the request pipeline for refreshes.
    pub fn session_issuer(&self) -> SessionIssuer {
        self.sessions.clone()
    }

    /// Issues a link token of `kind` for `email` and mails it.
    async fn send_link(&self, kind: TokenKind, email: &str) -> Result<(), AuthError> {
        let (ttl, mail) = match kind {
            TokenKind::Verification => (self.config.verification_token_ttl, MailKind::Verification),
            TokenKind::PasswordReset => {
                (self.config.password_reset_token_ttl, MailKind::PasswordReset)
            }
            TokenKind::TwoFactor => (self.config.two_factor_token_ttl, MailKind::TwoFactorCode),
        };

        let token = self.tokens.issue(kind, email, ttl).await?;
        self.notifier.send(mail, &token.email, &token.token).await?;
        Ok(())
    }
}

fn settle<T>(result: Result<T, AuthError>) -> Result<Result<T, ActionResult>, UnexpectedError> {
    match result {
        Ok(value) => Ok(Ok(value)),
        Err(e) => {
            if let AuthError::Unexpected(reason) = &e {
                error!(error = %reason, "Auth flow failed unexpectedly");
            }
            e.into_action().map(Err)
        }
    }
}

fn settle_action(
    result: Result<ActionResult, AuthError>,
) -> Result<ActionResult, UnexpectedError> {
    settle(result).map(|r| r.unwrap_or_else(|action| action))
}

#[async_trait]
impl AuthUseCases for AuthOrchestrator {
    async fn login(&self, request: LoginRequest) -> Result<LoginOutcome, UnexpectedError> {
        settle(self.login_flow(request).await).map(|r| r.unwrap_or_else(LoginOutcome::from))
    }

    async fn register(&self, request: RegisterRequest) -> Result<ActionResult, UnexpectedError> {
        settle_action(self.register_flow(request).await)
    }

    async fn request_password_reset(
        &self,
        request: ResetEmailRequest,
    ) -> Result<ActionResult, UnexpectedError> {
        settle_action(self.request_reset_flow(request).await)
    }

    async fn complete_password_reset(
        &self,
        token: Option<String>,
        request: NewPasswordRequest,
    ) -> Result<ActionResult, UnexpectedError> {
        settle_action(self.complete_reset_flow(token, request).await)
    }

    async fn verify_email(&self, token: &str) -> Result<ActionResult, UnexpectedError> {
        settle_action(self.verify_email_flow(token).await)
    }

    async fn logout(&self, bearer: &str) -> Result<ActionResult, UnexpectedError> {
        settle_action(self.logout_flow(bearer).await)
    }

    async fn complete_oauth_sign_in(
        &self,
        profile: OAuthProfile,
    ) -> Result<Result<IssuedSession, ActionResult>, UnexpectedError> {
        settle(self.oauth_flow(profile).await)
    }
}
