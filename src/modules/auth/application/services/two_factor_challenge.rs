use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::auth::application::domain::entities::{AuthToken, TokenKind, User};
use crate::auth::application::domain::outcome::AuthError;
use crate::auth::application::ports::outgoing::{TokenStore, TwoFactorConfirmationRepository};
use crate::email::application::ports::outgoing::{AuthEmailNotifier, MailKind};
use crate::shared::validation::FieldError;

/// Second login factor: a short-lived emailed code, traded for a single-use confirmation.
#[derive(Clone)]
pub struct TwoFactorChallenge {
    tokens: Arc<dyn TokenStore + Send + Sync>,
    confirmations: Arc<dyn TwoFactorConfirmationRepository + Send + Sync>,
    notifier: Arc<dyn AuthEmailNotifier + Send + Sync>,
    ttl: Duration,
}

impl TwoFactorChallenge {
    pub fn new(
        tokens: Arc<dyn TokenStore + Send + Sync>,
        confirmations: Arc<dyn TwoFactorConfirmationRepository + Send + Sync>,
        notifier: Arc<dyn AuthEmailNotifier + Send + Sync>,
        ttl: Duration,
    ) -> Self {
        Self {
            tokens,
            confirmations,
            notifier,
            ttl,
        }
    }

    /// Starts a new challenge: the confirmation from the previous login is dropped
    /// and a fresh code, replacing any earlier one, is mailed.
    pub async fn issue(&self, user: &User) -> Result<AuthToken, AuthError> {
        if self.confirmations.delete_for_user(user.id).await? {
            debug!(user_id = %user.id, "Previous two-factor confirmation cleared");
        }

        let email = user.email.as_str();
        let token = self.tokens.issue(TokenKind::TwoFactor, email, self.ttl).await?;

        self.notifier
            .send(MailKind::TwoFactorCode, &token.email, &token.token)
            .await?;

        info!(email = %email, expires_at = %token.expires_at, "Two-factor code issued");
        Ok(token)
    }

    pub async fn confirm(&self, user: &User, code: &str, now: DateTime<Utc>) -> Result<(), AuthError> {
        let Some(token) = self
            .tokens
            .find_by_email(TokenKind::TwoFactor, &user.email)
            .await?
        else {
            warn!(user_id = %user.id, "Two-factor code submitted with no challenge pending");
            return Err(AuthError::not_found("Invalid code"));
        };

        // An expired code never validates, whatever its value.
        if token.is_expired_at(now) {
            warn!(user_id = %user.id, "Expired two-factor code submitted");
            return Err(AuthError::expired("Code has expired"));
        }

        if token.token != code {
            warn!(user_id = %user.id, "Two-factor code mismatch");
            return Err(AuthError::validation(
                "Code is not correct",
                vec![FieldError::new("code", "Code is not correct")],
            ));
        }

        self.tokens.consume(TokenKind::TwoFactor, token.id).await?;
        self.confirmations.replace_for_user(user.id).await?;

        info!(user_id = %user.id, "Two-factor challenge passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::in_memory::{
        sample_user, InMemoryConfirmations, InMemoryTokens, RecordingNotifier,
    };

    struct Fixture {
        tokens: Arc<InMemoryTokens>,
        confirmations: Arc<InMemoryConfirmations>,
        notifier: Arc<RecordingNotifier>,
        challenge: TwoFactorChallenge,
    }

    fn fixture() -> Fixture {
        let tokens = Arc::new(InMemoryTokens::default());
        let confirmations = Arc::new(InMemoryConfirmations::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let challenge = TwoFactorChallenge::new(
            tokens.clone(),
            confirmations.clone(),
            notifier.clone(),
            Duration::minutes(5),
        );
        Fixture {
            tokens,
            confirmations,
            notifier,
            challenge,
        }
    }

    #[tokio::test]
    async fn issue_replaces_previous_code_and_mails_it() {
        let f = fixture();
        let user = sample_user("jane@example.com");
        let first = f.challenge.issue(&user).await.unwrap();
        let second = f.challenge.issue(&user).await.unwrap();

        let live = f.tokens.all(TokenKind::TwoFactor);
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].id, second.id);
        assert_ne!(live[0].id, first.id);

        let sent = f.notifier.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1], (MailKind::TwoFactorCode, "jane@example.com".to_string(), second.token));
    }

    #[tokio::test]
    async fn correct_code_consumes_token_and_leaves_one_confirmation() {
        let f = fixture();
        let user = sample_user("jane@example.com");
        let token = f.challenge.issue(&user).await.unwrap();

        f.challenge.confirm(&user, &token.token, Utc::now()).await.unwrap();

        assert!(f.tokens.all(TokenKind::TwoFactor).is_empty());
        assert_eq!(f.confirmations.count_for(user.id), 1);
    }

    #[tokio::test]
    async fn new_challenge_clears_the_previous_confirmation() {
        let f = fixture();
        let user = sample_user("jane@example.com");
        f.confirmations.replace_for_user(user.id).await.unwrap();

        f.challenge.issue(&user).await.unwrap();

        assert_eq!(f.confirmations.count_for(user.id), 0);
    }

    #[tokio::test]
    async fn consumed_code_cannot_be_reused() {
        let f = fixture();
        let user = sample_user("jane@example.com");
        let token = f.challenge.issue(&user).await.unwrap();
        f.challenge.confirm(&user, &token.token, Utc::now()).await.unwrap();

        let again = f.challenge.confirm(&user, &token.token, Utc::now()).await;
        assert_eq!(again, Err(AuthError::not_found("Invalid code")));
    }

    #[tokio::test]
    async fn expired_code_fails_even_when_it_matches() {
        let f = fixture();
        let user = sample_user("jane@example.com");
        let token = f.challenge.issue(&user).await.unwrap();
        let later = token.expires_at + Duration::seconds(1);

        let result = f.challenge.confirm(&user, &token.token, later).await;

        assert_eq!(result, Err(AuthError::expired("Code has expired")));
        assert_eq!(f.tokens.all(TokenKind::TwoFactor).len(), 1);
        assert_eq!(f.confirmations.count_for(user.id), 0);
    }

    #[tokio::test]
    async fn wrong_code_is_rejected_without_side_effects() {
        let f = fixture();
        let user = sample_user("jane@example.com");
        let token = f.challenge.issue(&user).await.unwrap();
        let wrong = if token.token == "111111" { "222222" } else { "111111" };

        let result = f.challenge.confirm(&user, wrong, Utc::now()).await;

        assert!(matches!(result, Err(AuthError::Validation { ref message, .. }) if message == "Code is not correct"));
        assert_eq!(f.tokens.all(TokenKind::TwoFactor).len(), 1);
        assert_eq!(f.confirmations.count_for(user.id), 0);
    }

    #[tokio::test]
    async fn mail_failure_is_unexpected() {
        let f = fixture();
        f.notifier.fail_next();

        let result = f.challenge.issue(&sample_user("jane@example.com")).await;
        assert!(matches!(result, Err(AuthError::Unexpected(_))));
    }
}
