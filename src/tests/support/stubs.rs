use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::auth::application::domain::entities::{OAuthProfile, UserRole};
use crate::auth::application::domain::forms::{
    LoginRequest, NewPasswordRequest, RegisterRequest, ResetEmailRequest,
};
use crate::auth::application::domain::outcome::{
    ActionResult, IssuedSession, LoginOutcome, UnexpectedError,
};
use crate::auth::application::domain::session::{SessionClaims, SessionUser};
use crate::auth::application::ports::incoming::{AuthUseCases, SessionRefresher};
use crate::auth::application::ports::outgoing::{SessionTokenProvider, SignedSession, TokenError};
use crate::auth::application::services::SessionError;

const ADMIN_ID: Uuid = Uuid::from_u128(0xA);
const USER_ID: Uuid = Uuid::from_u128(0xB);

pub fn admin_user() -> SessionUser {
    SessionUser {
        id: ADMIN_ID,
        name: Some("Ada".to_string()),
        email: Some("admin@example.com".to_string()),
        image: None,
        role: Some(UserRole::Admin),
        is_two_factor_enabled: false,
        is_oauth: false,
    }
}

pub fn plain_user() -> SessionUser {
    SessionUser {
        id: USER_ID,
        name: Some("Jane".to_string()),
        email: Some("jane@example.com".to_string()),
        image: None,
        role: Some(UserRole::User),
        is_two_factor_enabled: false,
        is_oauth: false,
    }
}

pub fn sample_session() -> IssuedSession {
    IssuedSession {
        token: "signed.session.jwt".to_string(),
        expires_at: Utc::now() + Duration::hours(1),
        user: plain_user(),
    }
}

// ==================== Auth use cases ====================

#[derive(Clone)]
enum Scripted {
    Action(ActionResult),
    Failure,
}

/// Answers every auth action with one scripted result and records the tokens it was handed.
#[derive(Clone)]
pub struct StubAuthUseCases {
    login: LoginOutcome,
    action: Scripted,
    seen: Arc<Mutex<Vec<String>>>,
}

impl Default for StubAuthUseCases {
    fn default() -> Self {
        Self {
            login: LoginOutcome::Action(ActionResult::error("Invalid email or password")),
            action: Scripted::Action(ActionResult::success("ok")),
            seen: Arc::default(),
        }
    }
}

impl StubAuthUseCases {
    pub fn with_login(mut self, outcome: LoginOutcome) -> Self {
        self.login = outcome;
        self
    }

    pub fn with_action(mut self, action: ActionResult) -> Self {
        self.action = Scripted::Action(action);
        self
    }

    pub fn failing() -> Self {
        Self {
            action: Scripted::Failure,
            ..Self::default()
        }
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }

    fn record(&self, value: &str) {
        self.seen.lock().unwrap().push(value.to_string());
    }

    fn respond(&self) -> Result<ActionResult, UnexpectedError> {
        match &self.action {
            Scripted::Action(action) => Ok(action.clone()),
            Scripted::Failure => Err(UnexpectedError("stubbed failure".to_string())),
        }
    }
}

#[async_trait]
impl AuthUseCases for StubAuthUseCases {
    async fn login(&self, _request: LoginRequest) -> Result<LoginOutcome, UnexpectedError> {
        match self.action {
            Scripted::Failure => Err(UnexpectedError("stubbed failure".to_string())),
            Scripted::Action(_) => Ok(self.login.clone()),
        }
    }

    async fn register(&self, _request: RegisterRequest) -> Result<ActionResult, UnexpectedError> {
        self.respond()
    }

    async fn request_password_reset(
        &self,
        _request: ResetEmailRequest,
    ) -> Result<ActionResult, UnexpectedError> {
        self.respond()
    }

    async fn complete_password_reset(
        &self,
        token: Option<String>,
        _request: NewPasswordRequest,
    ) -> Result<ActionResult, UnexpectedError> {
        self.record(token.as_deref().unwrap_or("<none>"));
        self.respond()
    }

    async fn verify_email(&self, token: &str) -> Result<ActionResult, UnexpectedError> {
        self.record(token);
        self.respond()
    }

    async fn logout(&self, bearer: &str) -> Result<ActionResult, UnexpectedError> {
        self.record(bearer);
        self.respond()
    }

    async fn complete_oauth_sign_in(
        &self,
        _profile: OAuthProfile,
    ) -> Result<Result<IssuedSession, ActionResult>, UnexpectedError> {
        self.respond().map(Err)
    }
}

// ==================== Sessions ====================

/// Accepts any token starting with `valid`; `valid-admin` carries the admin role.
#[derive(Clone, Default)]
pub struct StubSessionTokens;

impl SessionTokenProvider for StubSessionTokens {
    fn sign(&self, _claims: SessionClaims) -> Result<SignedSession, TokenError> {
        Err(TokenError::EncodingError("stub cannot sign".to_string()))
    }

    fn session_ttl(&self) -> Duration {
        Duration::hours(1)
    }

    fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        if !token.starts_with("valid") {
            return Err(TokenError::MalformedToken);
        }
        let user = if token == "valid-admin" {
            admin_user()
        } else {
            plain_user()
        };
        let now = Utc::now().timestamp();

        Ok(SessionClaims {
            sub: user.id,
            sid: Uuid::new_v4(),
            role: user.role,
            email: user.email,
            name: user.name,
            image: None,
            is_two_factor_enabled: false,
            is_oauth: false,
            iss: "Marketplace".to_string(),
            iat: now,
            nbf: now,
            exp: now + 3600,
        })
    }
}

#[derive(Clone, Default)]
pub struct StubSessionRefresher;

#[async_trait]
impl SessionRefresher for StubSessionRefresher {
    async fn refresh(&self, bearer: &str) -> Result<IssuedSession, SessionError> {
        let user = match bearer {
            "valid-admin" => admin_user(),
            "valid-user" => plain_user(),
            "revoked" => return Err(SessionError::Revoked),
            _ => return Err(SessionError::Invalid(TokenError::MalformedToken)),
        };

        Ok(IssuedSession {
            token: format!("refreshed-{bearer}"),
            expires_at: Utc::now() + Duration::hours(1),
            user,
        })
    }
}
