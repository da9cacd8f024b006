use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use std::fmt;
use tracing;

use crate::auth::application::domain::session::SessionClaims;
use crate::auth::application::ports::outgoing::{SessionTokenProvider, SignedSession, TokenError};

use super::session_config::SessionConfig;

#[derive(Clone)]
pub struct JwtSessionTokenService {
    config: SessionConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

#[cfg(not(tarpaulin_include))]
impl fmt::Debug for JwtSessionTokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSessionTokenService")
            .field("issuer", &self.config.issuer)
            .field("session_expiry", &self.config.session_expiry)
            .finish()
    }
}

impl JwtSessionTokenService {
    pub fn new(config: SessionConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret_key.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret_key.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 30;
        validation.validate_nbf = true;
        validation.set_issuer(&[self.config.issuer.as_str()]);
        validation
    }
}

impl SessionTokenProvider for JwtSessionTokenService {
    fn sign(&self, mut claims: SessionClaims) -> Result<SignedSession, TokenError> {
        let now = Utc::now();

        claims.iss = self.config.issuer.clone();
        claims.iat = now.timestamp();
        claims.nbf = now.timestamp();
        claims.exp = (now + Duration::seconds(self.config.session_expiry)).timestamp();

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingError(e.to_string()))?;

        Ok(SignedSession { token, claims })
    }

    fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let decoded = decode::<SessionClaims>(token, &self.decoding_key, &self.validation())
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;

                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Session verification failed: token expired");
                        TokenError::TokenExpired
                    }
                    ErrorKind::ImmatureSignature => {
                        tracing::warn!("Session verification failed: token not yet valid");
                        TokenError::TokenNotYetValid
                    }
                    ErrorKind::InvalidIssuer => {
                        tracing::warn!("Session verification failed: untrusted issuer");
                        TokenError::InvalidIssuer
                    }
                    ErrorKind::InvalidSignature => {
                        tracing::error!("Security alert: invalid session signature detected");
                        TokenError::InvalidSignature
                    }
                    ErrorKind::InvalidToken | ErrorKind::InvalidAlgorithm => {
                        tracing::error!("Security alert: malformed or invalid algorithm token");
                        TokenError::MalformedToken
                    }
                    _ => {
                        tracing::warn!("Session verification failed: malformed token");
                        TokenError::MalformedToken
                    }
                }
            })?;

        Ok(decoded.claims)
    }

    fn session_ttl(&self) -> Duration {
        Duration::seconds(self.config.session_expiry)
    }
}
