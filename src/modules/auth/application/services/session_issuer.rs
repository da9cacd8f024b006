use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::auth::application::domain::entities::{User, UserSnapshot};
use crate::auth::application::domain::outcome::IssuedSession;
use crate::auth::application::domain::session::{
    enrich, project, EnrichOutcome, SessionClaims, SessionUser, StaleSessionPolicy,
};
use crate::auth::application::ports::outgoing::{
    AccountRepository, RevocationError, SessionRevocationStore, SessionTokenProvider,
    SignedSession, TokenError, UserQuery,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("Invalid session token: {0}")]
    Invalid(TokenError),

    #[error("Session has been revoked")]
    Revoked,

    #[error("Session store error: {0}")]
    Store(String),
}

impl From<RevocationError> for SessionError {
    fn from(e: RevocationError) -> Self {
        SessionError::Store(e.to_string())
    }
}

/// Mints, refreshes and revokes signed sessions.
#[derive(Clone)]
pub struct SessionIssuer {
    tokens: Arc<dyn SessionTokenProvider + Send + Sync>,
    revocations: Arc<dyn SessionRevocationStore + Send + Sync>,
    users: Arc<dyn UserQuery + Send + Sync>,
    accounts: Arc<dyn AccountRepository + Send + Sync>,
    policy: StaleSessionPolicy,
}

impl SessionIssuer {
    pub fn new(
        tokens: Arc<dyn SessionTokenProvider + Send + Sync>,
        revocations: Arc<dyn SessionRevocationStore + Send + Sync>,
        users: Arc<dyn UserQuery + Send + Sync>,
        accounts: Arc<dyn AccountRepository + Send + Sync>,
        policy: StaleSessionPolicy,
    ) -> Self {
        Self {
            tokens,
            revocations,
            users,
            accounts,
            policy,
        }
    }

    async fn snapshot(&self, user: User) -> Result<UserSnapshot, SessionError> {
        let has_linked_account = self
            .accounts
            .exists_for_user(user.id)
            .await
            .map_err(|e| SessionError::Store(e.to_string()))?;

        Ok(UserSnapshot {
            user,
            has_linked_account,
        })
    }

    fn sign(&self, claims: SessionClaims, previous: Option<&SessionUser>) -> Result<IssuedSession, SessionError> {
        let SignedSession { token, claims } =
            self.tokens.sign(claims).map_err(SessionError::Invalid)?;

        Ok(IssuedSession {
            token,
            expires_at: timestamp(claims.exp),
            user: project(&claims, previous),
        })
    }

    /// Starts a new session for a user who just signed in.
    pub async fn mint(&self, user: &User) -> Result<IssuedSession, SessionError> {
        let claims = SessionClaims {
            sub: user.id,
            sid: Uuid::new_v4(),
            role: None,
            email: None,
            name: None,
            image: None,
            is_two_factor_enabled: false,
            is_oauth: false,
            iss: String::new(),
            iat: 0,
            nbf: 0,
            exp: 0,
        };

        let snapshot = self.snapshot(user.clone()).await?;
        let EnrichOutcome::Active(claims) = enrich(claims, Some(&snapshot), self.policy) else {
            return Err(SessionError::Revoked);
        };

        let issued = self.sign(claims, None)?;
        info!(user_id = %user.id, is_oauth = issued.user.is_oauth, "Session minted");
        Ok(issued)
    }

    /// Verifies `bearer`, re-reads the user and re-signs with a fresh lifetime.
    pub async fn refresh(&self, bearer: &str) -> Result<IssuedSession, SessionError> {
        let claims = self.tokens.verify(bearer).map_err(|e| {
            debug!(error = %e, "Session token rejected");
            SessionError::Invalid(e)
        })?;

        if self.revocations.is_revoked(&claims.sid.to_string()).await? {
            debug!(user_id = %claims.sub, "Revoked session presented");
            return Err(SessionError::Revoked);
        }

        let user = self
            .users
            .find_by_id(claims.sub)
            .await
            .map_err(|e| SessionError::Store(e.to_string()))?;
        let snapshot = match user {
            Some(user) => Some(self.snapshot(user).await?),
            None => None,
        };

        let previous = project(&claims, None);
        match enrich(claims, snapshot.as_ref(), self.policy) {
            EnrichOutcome::Active(enriched) => self.sign(enriched, Some(&previous)),
            EnrichOutcome::Revoked => {
                warn!(user_id = %previous.id, "Session user no longer exists");
                Err(SessionError::Revoked)
            }
        }
    }

    /// Revokes the session behind `bearer`. Unusable tokens need no revoking.
    ///
    /// Refreshing keeps the `sid` while pushing `exp` forward, so the bearer's own
    /// `exp` may predate a newer token of the same session. The revocation lasts a
    /// full session lifetime from now instead, which outlives every such token.
    pub async fn revoke(&self, bearer: &str) -> Result<(), SessionError> {
        let claims = match self.tokens.verify(bearer) {
            Ok(claims) => claims,
            Err(e) => {
                debug!(error = %e, "Logout with an unusable token");
                return Ok(());
            }
        };

        match self
            .revocations
            .revoke(claims.sid.to_string(), claims.sub, Utc::now() + self.tokens.session_ttl())
            .await
        {
            Ok(()) | Err(RevocationError::AlreadyExpired) => {
                info!(user_id = %claims.sub, "Session revoked");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn timestamp(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(seconds, 0).single().unwrap_or_else(Utc::now)
}
