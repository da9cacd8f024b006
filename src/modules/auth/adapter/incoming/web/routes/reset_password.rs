use actix_web::{post, web, Responder};
use tracing::info;

use super::action_response;
use crate::api::schemas::ErrorResponse;
use crate::auth::application::domain::forms::ResetEmailRequest;
use crate::auth::application::domain::outcome::ActionResult;
use crate::AppState;

/// Request a password reset link
#[utoipa::path(
    post,
    path = "/api/auth/reset",
    tag = "auth",
    request_body = ResetEmailRequest,
    responses(
        (
            status = 200,
            description = "Link mailed, or `{\"error\": \"Email not found\"}`",
            body = ActionResult,
            example = json!({ "success": "Email successfully sent" })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/reset")]
pub async fn reset_password_handler(
    req: web::Json<ResetEmailRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let request = req.into_inner();
    info!(email = %request.email(), "Password reset requested");

    action_response(data.auth.request_password_reset(request).await)
}
