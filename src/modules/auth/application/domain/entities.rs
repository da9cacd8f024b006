use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    #[default]
    User,
    Admin,
    Seller,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::Admin => "ADMIN",
            UserRole::Seller => "SELLER",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(UserRole::User),
            "ADMIN" => Ok(UserRole::Admin),
            "SELLER" => Ok(UserRole::Seller),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub role: UserRole,
    pub email_verified: Option<DateTime<Utc>>,
    pub image: Option<String>,
    pub is_two_factor_enabled: bool,
}

impl User {
    pub fn is_email_verified(&self) -> bool {
        self.email_verified.is_some()
    }
}

/// Input for inserting a user row.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: Option<String>,
    pub email: String,
    pub password_hash: Option<String>,
    pub role: UserRole,
    pub email_verified: Option<DateTime<Utc>>,
    pub image: Option<String>,
}

/// External identity provider link. Its presence marks the user as OAuth-origin.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedAccount {
    pub id: Uuid,
    pub user_id: Uuid,
    pub provider: String,
    pub provider_account_id: String,
}

/// Identity handed over by an OAuth provider callback.
#[derive(Debug, Clone)]
pub struct OAuthProfile {
    pub provider: String,
    pub provider_account_id: String,
    pub email: String,
    pub name: Option<String>,
    pub image: Option<String>,
}

/// The user row plus the facts the session needs about it.
#[derive(Debug, Clone)]
pub struct UserSnapshot {
    pub user: User,
    pub has_linked_account: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Verification,
    PasswordReset,
    TwoFactor,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Verification => "verification",
            TokenKind::PasswordReset => "password_reset",
            TokenKind::TwoFactor => "two_factor",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "verification" => Some(TokenKind::Verification),
            "password_reset" => Some(TokenKind::PasswordReset),
            "two_factor" => Some(TokenKind::TwoFactor),
            _ => None,
        }
    }

    /// Random UUID v4 for link tokens, six digit code for two-factor.
    pub fn generate_value(&self) -> String {
        match self {
            TokenKind::Verification | TokenKind::PasswordReset => Uuid::new_v4().to_string(),
            TokenKind::TwoFactor => rand::thread_rng().gen_range(100_000..1_000_000).to_string(),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single-use, email-bound credential with an absolute expiry.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthToken {
    pub id: Uuid,
    pub kind: TokenKind,
    pub email: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl AuthToken {
    pub fn generate(kind: TokenKind, email: &str, ttl: Duration, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            email: email.to_string(),
            token: kind.generate_value(),
            expires_at: now + ttl,
        }
    }

    /// Expired once `now` has passed `expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Proof that a user passed the two-factor challenge; consumed by the next sign-in.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoFactorConfirmation {
    pub id: Uuid,
    pub user_id: Uuid,
}
