use actix_web::{post, web, Responder};
use tracing::info;

use super::action_response;
use crate::api::schemas::ErrorResponse;
use crate::auth::application::domain::forms::RegisterRequest;
use crate::auth::application::domain::outcome::ActionResult;
use crate::AppState;

/// Register a new account
///
/// Creates the user and mails a verification link.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (
            status = 200,
            description = "Created, or `{\"error\": ...}` when the input is rejected",
            body = ActionResult,
            example = json!({ "success": "User created successfully" })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/register")]
pub async fn register_user_handler(
    req: web::Json<RegisterRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let request = req.into_inner();
    info!(email = %request.email(), "Registration attempt");

    action_response(data.auth.register(request).await)
}
