use std::env;

use crate::auth::application::config::{env_or, ConfigError};

const MAX_SESSION_EXPIRY: i64 = 31_536_000;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub secret_key: String,
    pub issuer: String,
    pub session_expiry: i64, // seconds, refreshed on every use
}

impl SessionConfig {
    /// Load session signing settings from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret_key =
            env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET".to_string()))?;

        let issuer: String = env_or("JWT_ISSUER", "Marketplace".to_string())?;
        let session_expiry: i64 = env_or("SESSION_EXPIRY", 2_592_000)?;

        Self::new(secret_key, issuer, session_expiry)
    }

    pub fn new(secret_key: String, issuer: String, session_expiry: i64) -> Result<Self, ConfigError> {
        // HS256 needs at least 32 bytes of key material
        if secret_key.len() < 32 {
            return Err(ConfigError::invalid(
                "JWT_SECRET",
                "must be at least 32 characters long for HS256",
            ));
        }

        if !(1..=MAX_SESSION_EXPIRY).contains(&session_expiry) {
            return Err(ConfigError::invalid(
                "SESSION_EXPIRY",
                format!("must be between 1 and {MAX_SESSION_EXPIRY} seconds"),
            ));
        }

        Ok(Self {
            secret_key,
            issuer,
            session_expiry,
        })
    }
}
