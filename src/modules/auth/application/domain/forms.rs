use serde::Deserialize;
use utoipa::ToSchema;

use crate::shared::validation::{FieldError, Rule, Validator};

const VALID_EMAIL: Rule = Rule::Email("Please enter a valid email");
const PASSWORD_REQUIRED: Rule = Rule::MinChars(1, "Password must be at least 1 characters");
const PASSWORD_MIN_SIX: Rule = Rule::MinChars(6, "Password must be at least 6 characters");
const NAME_REQUIRED: Rule = Rule::MinChars(1, "Name is required");

/// Emails are compared and stored trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[schema(example = "secret123")]
    pub password: String,
    /// Two-factor code, sent on the second step of a 2FA login
    #[schema(example = "493021")]
    #[serde(default)]
    pub code: Option<String>,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        Validator::new()
            .field("email", &self.email, &[VALID_EMAIL])
            .field("password", &self.password, &[PASSWORD_REQUIRED])
            .finish()
    }

    pub fn email(&self) -> String {
        normalize_email(&self.email)
    }

    /// An empty code counts as no code.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[schema(example = "secret123")]
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        Validator::new()
            .field("name", &self.name, &[NAME_REQUIRED])
            .field("email", &self.email, &[VALID_EMAIL])
            .field("password", &self.password, &[PASSWORD_MIN_SIX])
            .finish()
    }

    pub fn email(&self) -> String {
        normalize_email(&self.email)
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ResetEmailRequest {
    #[schema(example = "jane@example.com")]
    pub email: String,
}

impl ResetEmailRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        Validator::new()
            .field("email", &self.email, &[VALID_EMAIL])
            .finish()
    }

    pub fn email(&self) -> String {
        normalize_email(&self.email)
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewPasswordRequest {
    #[schema(example = "newsecret123")]
    pub password: String,
}

impl NewPasswordRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        Validator::new()
            .field("password", &self.password, &[PASSWORD_MIN_SIX])
            .finish()
    }
}
