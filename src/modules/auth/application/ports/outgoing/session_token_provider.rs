use chrono::Duration;
use std::error::Error;
use std::fmt;

use crate::auth::application::domain::session::SessionClaims;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenError {
    TokenExpired,
    TokenNotYetValid,
    InvalidIssuer,
    InvalidSignature,
    MalformedToken,
    EncodingError(String),
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenError::TokenExpired => write!(f, "Token has expired"),
            TokenError::TokenNotYetValid => write!(f, "Token is not yet valid"),
            TokenError::InvalidIssuer => write!(f, "Token issuer is not trusted"),
            TokenError::InvalidSignature => write!(f, "Invalid token signature"),
            TokenError::MalformedToken => write!(f, "Malformed token"),
            TokenError::EncodingError(msg) => write!(f, "Token encoding error: {}", msg),
        }
    }
}
impl Error for TokenError {}

/// A signed session token together with the claims it carries.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedSession {
    pub token: String,
    pub claims: SessionClaims,
}

pub trait SessionTokenProvider: Send + Sync {
    /// Stamps issuer and a fresh lifetime (`iat`, `nbf`, `exp`) onto `claims`, then signs.
    fn sign(&self, claims: SessionClaims) -> Result<SignedSession, TokenError>;

    fn verify(&self, token: &str) -> Result<SessionClaims, TokenError>;

    /// How long a freshly signed token stays valid.
    fn session_ttl(&self) -> Duration;
}
