pub mod auth_email_service;

pub use auth_email_service::AuthEmailService;
