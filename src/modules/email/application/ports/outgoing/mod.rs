pub mod auth_email_notifier;
pub mod email_sender;

pub use auth_email_notifier::{AuthEmailError, AuthEmailNotifier, MailKind};
pub use email_sender::{EmailSendError, EmailSender};
