use crate::email::application::ports::outgoing::{
    AuthEmailError, AuthEmailNotifier, EmailSender, MailKind,
};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::{error, info};

/// Renders the auth messages and hands them to an `EmailSender`.
#[derive(Clone)]
pub struct AuthEmailService {
    sender: Arc<dyn EmailSender + Send + Sync>,
    app_url: String,
}

impl fmt::Debug for AuthEmailService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthEmailService")
            .field("sender", &"<dyn EmailSender>")
            .field("app_url", &self.app_url)
            .finish()
    }
}

impl AuthEmailService {
    pub fn new(sender: Arc<dyn EmailSender + Send + Sync>, app_url: &str) -> Self {
        Self {
            sender,
            app_url: app_url.trim_end_matches('/').to_string(),
        }
    }

    fn compose(&self, kind: MailKind, token: &str) -> (&'static str, String) {
        match kind {
            MailKind::Verification => {
                let link = format!("{}/auth/email-verification?token={}", self.app_url, token);
                (
                    "Confirm your email",
                    format!("<p>Click <a href=\"{link}\">here</a> to confirm your email</p>"),
                )
            }
            MailKind::PasswordReset => {
                let link = format!("{}/auth/new-password?token={}", self.app_url, token);
                (
                    "Reset your password",
                    format!("<p>Click <a href=\"{link}\">here</a> to reset your password</p>"),
                )
            }
            MailKind::TwoFactorCode => (
                "Your sign-in code",
                format!("<p>Your 2FA code is: {token}</p>"),
            ),
        }
    }
}

#[async_trait]
impl AuthEmailNotifier for AuthEmailService {
    async fn send(&self, kind: MailKind, email: &str, token: &str) -> Result<(), AuthEmailError> {
        let (subject, body) = self.compose(kind, token);

        self.sender
            .send_email(email, subject, &body)
            .await
            .map_err(|e| {
                error!(email = %email, kind = ?kind, error = %e, "Failed to send auth email");
                AuthEmailError::EmailSendingFailed(e.to_string())
            })?;

        info!(email = %email, kind = ?kind, "Auth email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::email::application::ports::outgoing::EmailSendError;
    use mockall::mock;

    mock! {
        pub EmailSenderMock {}
        #[async_trait]
        impl EmailSender for EmailSenderMock {
            async fn send_email(&self, to: &str, subject: &str, html_body: &str) -> Result<(), EmailSendError>;
        }
    }

    #[tokio::test]
    async fn verification_mail_links_to_verification_page() {
        let mut sender = MockEmailSenderMock::new();
        sender
            .expect_send_email()
            .withf(|to, subject, body| {
                to == "jane@example.com"
                    && subject == "Confirm your email"
                    && body.contains("https://shop.test/auth/email-verification?token=abc-123")
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = AuthEmailService::new(Arc::new(sender), "https://shop.test/");
        let result = service
            .send(MailKind::Verification, "jane@example.com", "abc-123")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn reset_mail_links_to_new_password_page() {
        let mut sender = MockEmailSenderMock::new();
        sender
            .expect_send_email()
            .withf(|_, subject, body| {
                subject == "Reset your password"
                    && body.contains("http://localhost:3000/auth/new-password?token=tok")
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = AuthEmailService::new(Arc::new(sender), "http://localhost:3000");
        assert!(service
            .send(MailKind::PasswordReset, "jane@example.com", "tok")
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn two_factor_mail_carries_the_code() {
        let mut sender = MockEmailSenderMock::new();
        sender
            .expect_send_email()
            .withf(|_, _, body| body.contains("Your 2FA code is: 123456"))
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = AuthEmailService::new(Arc::new(sender), "http://localhost:3000");
        assert!(service
            .send(MailKind::TwoFactorCode, "jane@example.com", "123456")
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn sender_failure_is_reported() {
        let mut sender = MockEmailSenderMock::new();
        sender
            .expect_send_email()
            .returning(|_, _, _| Err(EmailSendError::TransportFailed("timeout".to_string())));

        let service = AuthEmailService::new(Arc::new(sender), "http://localhost:3000");
        let result = service
            .send(MailKind::Verification, "jane@example.com", "tok")
            .await;

        match result {
            Err(AuthEmailError::EmailSendingFailed(msg)) => assert!(msg.contains("timeout")),
            other => panic!("expected send failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn each_kind_goes_out_once_to_the_recipient() {
        use crate::email::adapter::outgoing::mock_sender::MockEmailSender;

        let sender = MockEmailSender::new();
        let service = AuthEmailService::new(Arc::new(sender.clone()), "http://localhost:3000");

        for kind in [
            MailKind::Verification,
            MailKind::PasswordReset,
            MailKind::TwoFactorCode,
        ] {
            service.send(kind, "jane@example.com", "t0k").await.unwrap();
        }

        let sent = sender.get_sent_emails();
        assert_eq!(sent.len(), 3);
        assert!(sent.iter().all(|(to, _, body)| to == "jane@example.com" && body.contains("t0k")));
        assert_eq!(sent[2].1, "Your sign-in code");
    }

    #[test]
    fn debug_hides_sender() {
        let service = AuthEmailService::new(Arc::new(MockEmailSenderMock::new()), "http://x");
        let debug_output = format!("{:?}", service);
        assert!(debug_output.contains("<dyn EmailSender>"));
    }
}
