use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use super::action_response;
use crate::api::schemas::ErrorResponse;
use crate::auth::application::domain::forms::NewPasswordRequest;
use crate::auth::application::domain::outcome::ActionResult;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewPasswordBody {
    #[schema(example = "newsecret123")]
    pub password: String,
    /// Reset token from the emailed link
    #[schema(example = "9b2f6a3e-0c1d-4c55-9f3e-2d1a7b8c9e10")]
    #[serde(default)]
    pub token: Option<String>,
}

/// Set a new password with a reset token
#[utoipa::path(
    post,
    path = "/api/auth/new-password",
    tag = "auth",
    request_body = NewPasswordBody,
    responses(
        (
            status = 200,
            description = "Password updated, or `{\"error\": ...}` for a missing, unknown or expired token",
            body = ActionResult,
            example = json!({ "success": "Password successfully updated" })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/new-password")]
pub async fn new_password_handler(
    req: web::Json<NewPasswordBody>,
    data: web::Data<AppState>,
) -> impl Responder {
    let NewPasswordBody { password, token } = req.into_inner();
    info!(has_token = token.is_some(), "New password submitted");

    action_response(
        data.auth
            .complete_password_reset(token, NewPasswordRequest { password })
            .await,
    )
}
