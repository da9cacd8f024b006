use async_trait::async_trait;

use crate::auth::application::domain::outcome::IssuedSession;
use crate::auth::application::services::{SessionError, SessionIssuer};

#[async_trait]
pub trait SessionRefresher: Send + Sync {
    /// Re-validates `bearer` against current user state and hands back a re-signed session.
    async fn refresh(&self, bearer: &str) -> Result<IssuedSession, SessionError>;
}

#[async_trait]
impl SessionRefresher for SessionIssuer {
    async fn refresh(&self, bearer: &str) -> Result<IssuedSession, SessionError> {
        SessionIssuer::refresh(self, bearer).await
    }
}
