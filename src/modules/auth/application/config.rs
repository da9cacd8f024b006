use chrono::Duration;
use std::env;
use std::str::FromStr;

use super::domain::routes::DEFAULT_LOGIN_REDIRECT;
use super::domain::session::StaleSessionPolicy;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(String),

    #[error("Invalid {key} value: {reason}")]
    Invalid { key: String, reason: String },
}

impl ConfigError {
    pub fn invalid(key: &str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Reads `key`, falling back to `default` when unset.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::invalid(key, e.to_string())),
        Err(_) => Ok(default),
    }
}

/// Immutable settings handed to the auth orchestrator at construction.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub app_url: String,
    pub verification_token_ttl: Duration,
    pub password_reset_token_ttl: Duration,
    pub two_factor_token_ttl: Duration,
    pub require_email_verification: bool,
    pub stale_session_policy: StaleSessionPolicy,
    pub default_login_redirect: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            app_url: "http://localhost:3000".to_string(),
            verification_token_ttl: Duration::seconds(3600),
            password_reset_token_ttl: Duration::seconds(3600),
            two_factor_token_ttl: Duration::seconds(300),
            require_email_verification: false,
            stale_session_policy: StaleSessionPolicy::ForceLogout,
            default_login_redirect: DEFAULT_LOGIN_REDIRECT.to_string(),
        }
    }
}

impl AuthConfig {
    fn ttl(key: &str, default: i64) -> Result<Duration, ConfigError> {
        let seconds: i64 = env_or(key, default)?;
        if seconds <= 0 {
            return Err(ConfigError::invalid(key, "must be a positive number of seconds"));
        }
        Duration::try_seconds(seconds)
            .ok_or_else(|| ConfigError::invalid(key, "number of seconds is out of range"))
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let stale_session_policy = match env::var("STALE_SESSION_POLICY") {
            Ok(raw) => raw
                .parse::<StaleSessionPolicy>()
                .map_err(|e| ConfigError::invalid("STALE_SESSION_POLICY", e))?,
            Err(_) => defaults.stale_session_policy,
        };

        let default_login_redirect: String =
            env_or("DEFAULT_LOGIN_REDIRECT", defaults.default_login_redirect)?;
        if !default_login_redirect.starts_with('/') {
            return Err(ConfigError::invalid(
                "DEFAULT_LOGIN_REDIRECT",
                "must be an absolute path",
            ));
        }

        Ok(Self {
            app_url: env_or::<String>("APP_URL", defaults.app_url)?
                .trim_end_matches('/')
                .to_string(),
            verification_token_ttl: Self::ttl("VERIFICATION_TOKEN_TTL", 3600)?,
            password_reset_token_ttl: Self::ttl("PASSWORD_RESET_TOKEN_TTL", 3600)?,
            two_factor_token_ttl: Self::ttl("TWO_FACTOR_TOKEN_TTL", 300)?,
            require_email_verification: env_or("REQUIRE_EMAIL_VERIFICATION", false)?,
            stale_session_policy,
            default_login_redirect,
        })
    }
}
