use actix_web::{get, web, Responder};
use serde::Deserialize;
use tracing::info;
use utoipa::IntoParams;

use super::action_response;
use crate::api::schemas::ErrorResponse;
use crate::auth::application::domain::outcome::ActionResult;
use crate::AppState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct VerifyEmailQuery {
    /// Verification token from the emailed link
    pub token: Option<String>,
}

/// Confirm an email address
#[utoipa::path(
    get,
    path = "/api/auth/email-verification",
    tag = "auth",
    params(VerifyEmailQuery),
    responses(
        (
            status = 200,
            description = "Verified, or `{\"error\": ...}` for an unknown or expired token",
            body = ActionResult,
            example = json!({ "success": "Email has been verified" })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/auth/email-verification")]
pub async fn verify_email_handler(
    query: web::Query<VerifyEmailQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    info!("Email verification attempt");

    // An absent token is just one that does not exist.
    let token = query.into_inner().token.unwrap_or_default();
    action_response(data.auth.verify_email(&token).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::stubs::StubAuthUseCases;
    use actix_web::{test, App};
    use serde_json::json;

    #[actix_web::test]
    async fn reads_token_from_query() {
        let stub = StubAuthUseCases::default()
            .with_action(ActionResult::success("Email has been verified"));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(
                    TestAppStateBuilder::default().with_auth(stub.clone()).build(),
                ))
                .service(verify_email_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/auth/email-verification?token=tok-123")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body, json!({ "success": "Email has been verified" }));
        assert_eq!(stub.seen(), vec!["tok-123".to_string()]);
    }

    #[actix_web::test]
    async fn unexpected_failure_is_a_500() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(
                    TestAppStateBuilder::default()
                        .with_auth(StubAuthUseCases::failing())
                        .build(),
                ))
                .service(verify_email_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/auth/email-verification?token=x")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 500);
    }
}
