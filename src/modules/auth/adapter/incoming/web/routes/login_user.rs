use actix_web::{post, web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

use super::action_response;
use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::session_cookie;
use crate::auth::application::domain::forms::LoginRequest;
use crate::auth::application::domain::outcome::LoginOutcome;
use crate::auth::application::domain::session::SessionUser;
use crate::AppState;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignedInResponse {
    #[schema(example = "Signed in")]
    pub success: String,
    /// Where the client should navigate next
    #[schema(example = "/dashboard")]
    pub redirect: String,
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: SessionUser,
}

/// Sign in with email and password
///
/// Two-factor users get `{"twoFactor": true}` first and repeat the call with `code`.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (
            status = 200,
            description = "Signed in and the `session` cookie set. Otherwise an `ActionResult` such as `{\"twoFactor\": true}` or `{\"error\": \"Invalid email or password\"}`",
            body = SignedInResponse,
            example = json!({
                "success": "Signed in",
                "redirect": "/dashboard",
                "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
                "expiresAt": "2026-11-18T10:00:00Z",
                "user": {
                    "id": "123e4567-e89b-12d3-a456-426614174000",
                    "name": "Jane Doe",
                    "email": "jane@example.com",
                    "image": null,
                    "role": "USER",
                    "isTwoFactorEnabled": false,
                    "isOAuth": false
                }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/login")]
pub async fn login_user_handler(
    req: web::Json<LoginRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let request = req.into_inner();
    info!(email = %request.email(), with_code = request.code().is_some(), "Login attempt");

    match data.auth.login(request).await {
        Ok(LoginOutcome::SignedIn {
            session,
            redirect_to,
        }) => {
            let cookie = session_cookie(&session);
            HttpResponse::Ok().cookie(cookie).json(SignedInResponse {
                success: "Signed in".to_string(),
                redirect: redirect_to,
                token: session.token,
                expires_at: session.expires_at,
                user: session.user,
            })
        }
        Ok(LoginOutcome::Action(action)) => action_response(Ok(action)),
        Err(e) => action_response(Err(e)),
    }
}
