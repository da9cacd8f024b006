use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use super::entities::{UserRole, UserSnapshot};

/// Claims carried inside the signed session token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: Uuid,
    /// Stable across refreshes; logout revokes by it.
    pub sid: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub is_two_factor_enabled: bool,
    #[serde(default)]
    pub is_oauth: bool,
    pub iss: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
}

/// The session view handed to request handlers.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub role: Option<UserRole>,
    pub is_two_factor_enabled: bool,
    #[serde(rename = "isOAuth")]
    pub is_oauth: bool,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.role == Some(UserRole::Admin)
    }
}

/// What to do when a session names a user that no longer exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StaleSessionPolicy {
    #[default]
    ForceLogout,
    Tolerate,
}

impl FromStr for StaleSessionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "force-logout" | "force_logout" => Ok(StaleSessionPolicy::ForceLogout),
            "tolerate" => Ok(StaleSessionPolicy::Tolerate),
            other => Err(format!("unknown stale session policy '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EnrichOutcome {
    Active(SessionClaims),
    Revoked,
}

/// Refreshes the user facts on a session from the latest stored state.
pub fn enrich(
    mut claims: SessionClaims,
    snapshot: Option<&UserSnapshot>,
    policy: StaleSessionPolicy,
) -> EnrichOutcome {
    let Some(snapshot) = snapshot else {
        return match policy {
            StaleSessionPolicy::Tolerate => EnrichOutcome::Active(claims),
            StaleSessionPolicy::ForceLogout => EnrichOutcome::Revoked,
        };
    };

    let user = &snapshot.user;
    claims.is_oauth = snapshot.has_linked_account;
    claims.name = user.name.clone();
    claims.email = Some(user.email.clone());
    claims.image = user.image.clone();
    claims.role = Some(user.role);
    claims.is_two_factor_enabled = user.is_two_factor_enabled;

    EnrichOutcome::Active(claims)
}

/// Builds the handler-facing view. A missing role keeps the previous one.
pub fn project(claims: &SessionClaims, previous: Option<&SessionUser>) -> SessionUser {
    SessionUser {
        id: claims.sub,
        name: claims.name.clone(),
        email: claims.email.clone(),
        image: claims.image.clone(),
        role: claims.role.or_else(|| previous.and_then(|p| p.role)),
        is_two_factor_enabled: claims.is_two_factor_enabled,
        is_oauth: claims.is_oauth,
    }
}
