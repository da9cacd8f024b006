use actix_web::{get, Responder};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::CurrentSession;
use crate::auth::application::domain::session::SessionUser;
use crate::shared::api::ApiResponse;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: SessionUser,
    /// Re-signed token with a fresh expiry
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Current session
///
/// Reloads the user behind the token and returns a re-signed token.
#[utoipa::path(
    get,
    path = "/api/auth/session",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active session", body = inline(crate::api::schemas::SuccessResponse<SessionResponse>)),
        (
            status = 401,
            description = "Missing, invalid or revoked session",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "SESSION_REVOKED", "message": "Session has ended" }
            })
        ),
    )
)]
#[get("/api/auth/session")]
pub async fn get_session_handler(CurrentSession(session): CurrentSession) -> impl Responder {
    ApiResponse::success(SessionResponse {
        user: session.user,
        token: session.token,
        expires_at: session.expires_at,
    })
}
