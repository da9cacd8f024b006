use async_trait::async_trait;

/// The out-of-band messages the auth flows send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailKind {
    Verification,
    PasswordReset,
    TwoFactorCode,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthEmailError {
    #[error("Email sending failed: {0}")]
    EmailSendingFailed(String),
}

#[async_trait]
pub trait AuthEmailNotifier: Send + Sync {
    /// Delivers `token` to `email`. Awaited by the caller; no retries.
    async fn send(&self, kind: MailKind, email: &str, token: &str) -> Result<(), AuthEmailError>;
}
