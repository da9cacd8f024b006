use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Next;
use actix_web::{http::header, web, Error, HttpMessage, HttpResponse};
use tracing::debug;

use crate::auth::adapter::incoming::web::extractors::{session_cookie, session_token};
use crate::auth::application::domain::outcome::IssuedSession;
use crate::auth::application::domain::routes::{GateDecision, RouteClass};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Routes every request by its class and whether it carries a valid session.
///
/// Only the token signature and lifetime are checked here; handlers that need
/// the user go through the session extractors, which also honour revocation.
/// A session those extractors re-signed goes back out as the `session` cookie.
pub async fn request_gate<B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error>
where
    B: MessageBody + 'static,
{
    let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
        return next.call(req).await.map(ServiceResponse::map_into_left_body);
    };

    let path = req.path().to_string();
    let class = state.routes.classify(&path);
    let is_logged_in = session_token(req.request())
        .map(|token| state.session_tokens.verify(&token).is_ok())
        .unwrap_or(false);

    match state.routes.decide(class, is_logged_in) {
        GateDecision::Continue => {
            let mut res = next.call(req).await?;
            let refreshed = res.request().extensions().get::<IssuedSession>().cloned();
            if let Some(session) = refreshed {
                res.response_mut().add_cookie(&session_cookie(&session))?;
            }
            Ok(res.map_into_left_body())
        }
        GateDecision::Redirect(_) if class == RouteClass::Protected && path.starts_with("/api/") => {
            debug!(path = %path, "Anonymous API request rejected");
            let response = ApiResponse::unauthorized(
                "MISSING_AUTH_HEADER",
                "Missing or invalid authorization header",
            );
            Ok(req.into_response(response).map_into_right_body())
        }
        GateDecision::Redirect(location) => {
            debug!(path = %path, to = %location, "Request redirected");
            let response = HttpResponse::Found()
                .insert_header((header::LOCATION, location))
                .finish();
            Ok(req.into_response(response).map_into_right_body())
        }
    }
}
