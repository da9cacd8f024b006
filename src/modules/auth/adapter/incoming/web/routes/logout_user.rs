use actix_web::cookie::Cookie;
use actix_web::{post, web, HttpRequest, HttpResponse};
use tracing::{error, info};

use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::{session_token, SESSION_COOKIE};
use crate::auth::application::domain::outcome::ActionResult;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// End the current session
///
/// The session stays revoked until the token would have expired anyway.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (
            status = 200,
            description = "Logged out; the session cookie is cleared",
            body = ActionResult,
            example = json!({ "success": "Logged out successfully" })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/logout")]
pub async fn logout_user_handler(req: HttpRequest, data: web::Data<AppState>) -> HttpResponse {
    let token = session_token(&req).unwrap_or_default();
    info!(has_token = !token.is_empty(), "Logout attempt");

    match data.auth.logout(&token).await {
        Ok(action) => {
            let mut cookie = Cookie::new(SESSION_COOKIE, "");
            cookie.set_path("/");
            cookie.make_removal();
            HttpResponse::Ok().cookie(cookie).json(action)
        }
        Err(e) => {
            error!(error = %e, "Logout failed");
            ApiResponse::internal_error()
        }
    }
}
