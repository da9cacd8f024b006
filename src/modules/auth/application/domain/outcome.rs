use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::session::SessionUser;
use crate::shared::validation::FieldError;

/// Uniform body returned by every auth action: exactly one of `error`, `success` or `twoFactor`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ActionResult {
    Error {
        error: String,
    },
    Success {
        success: String,
    },
    TwoFactor {
        #[serde(rename = "twoFactor")]
        two_factor: bool,
    },
}

impl ActionResult {
    pub fn error(message: impl Into<String>) -> Self {
        ActionResult::Error {
            error: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        ActionResult::Success {
            success: message.into(),
        }
    }

    pub fn two_factor() -> Self {
        ActionResult::TwoFactor { two_factor: true }
    }
}

/// Faults the caller cannot act on. Rendered as a generic failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unexpected error: {0}")]
pub struct UnexpectedError(pub String);

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuthError {
    #[error("{message}")]
    Validation {
        message: String,
        fields: Vec<FieldError>,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Expired(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Authorization(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl AuthError {
    pub fn validation(message: &str, fields: Vec<FieldError>) -> Self {
        AuthError::Validation {
            message: message.to_string(),
            fields,
        }
    }

    pub fn not_found(message: &str) -> Self {
        AuthError::NotFound(message.to_string())
    }

    pub fn expired(message: &str) -> Self {
        AuthError::Expired(message.to_string())
    }

    pub fn unexpected(e: impl std::fmt::Display) -> Self {
        AuthError::Unexpected(e.to_string())
    }

    /// User-facing kinds become an `{error}` result; only `Unexpected` escapes.
    pub fn into_action(self) -> Result<ActionResult, UnexpectedError> {
        match self {
            AuthError::Unexpected(msg) => Err(UnexpectedError(msg)),
            other => Ok(ActionResult::error(other.to_string())),
        }
    }
}

/// A freshly signed session token.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: SessionUser,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    /// Anything short of a session: an error, a pending two-factor step or a notice.
    Action(ActionResult),
    SignedIn {
        session: IssuedSession,
        redirect_to: String,
    },
}

impl From<ActionResult> for LoginOutcome {
    fn from(action: ActionResult) -> Self {
        LoginOutcome::Action(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_results_serialize_to_single_key_objects() {
        assert_eq!(
            serde_json::to_value(ActionResult::error("Invalid code")).unwrap(),
            serde_json::json!({ "error": "Invalid code" })
        );
        assert_eq!(
            serde_json::to_value(ActionResult::success("Email has been verified")).unwrap(),
            serde_json::json!({ "success": "Email has been verified" })
        );
        assert_eq!(
            serde_json::to_value(ActionResult::two_factor()).unwrap(),
            serde_json::json!({ "twoFactor": true })
        );
    }

    #[test]
    fn user_facing_errors_become_error_actions() {
        let cases = [
            AuthError::validation("Invalid fields", vec![]),
            AuthError::not_found("Invalid token"),
            AuthError::expired("Token has expired"),
            AuthError::Conflict("User already exists".to_string()),
            AuthError::Authorization("Forbidden".to_string()),
        ];

        for err in cases {
            let message = err.to_string();
            assert_eq!(err.into_action(), Ok(ActionResult::error(message)));
        }
    }

    #[test]
    fn unexpected_errors_escape() {
        let result = AuthError::unexpected("db down").into_action();
        assert_eq!(result, Err(UnexpectedError("db down".to_string())));
    }
}
