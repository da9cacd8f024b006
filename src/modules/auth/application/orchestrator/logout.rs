use super::AuthOrchestrator;
use crate::auth::application::domain::outcome::{ActionResult, AuthError};

impl AuthOrchestrator {
    pub(super) async fn logout_flow(&self, bearer: &str) -> Result<ActionResult, AuthError> {
        self.sessions.revoke(bearer).await?;
        Ok(ActionResult::success("Logged out successfully"))
    }
}
