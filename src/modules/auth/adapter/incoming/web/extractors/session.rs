use actix_web::cookie::{time, Cookie, SameSite};
use actix_web::{
    dev::Payload, web, Error as ActixError, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use chrono::Utc;
use std::future::Future;
use std::pin::Pin;
use tracing::error;

use crate::auth::application::domain::outcome::IssuedSession;
use crate::auth::application::domain::session::SessionUser;
use crate::auth::application::services::SessionError;
use crate::shared::api::ApiResponse;
use crate::AppState;

pub const SESSION_COOKIE: &str = "session";

/// Bearer header first, then the session cookie.
pub fn session_token(req: &HttpRequest) -> Option<String> {
    let from_header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    from_header.or_else(|| {
        req.cookie(SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|s| !s.is_empty())
    })
}

/// The `session` cookie carrying `session`'s token until it expires.
pub fn session_cookie(session: &IssuedSession) -> Cookie<'static> {
    let max_age = (session.expires_at - Utc::now()).num_seconds().max(0);
    Cookie::build(SESSION_COOKIE, session.token.clone())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(max_age))
        .finish()
}

fn create_api_error(response: HttpResponse) -> ActixError {
    actix_web::error::InternalError::from_response("", response).into()
}

fn session_error_response(e: SessionError) -> ActixError {
    let response = match e {
        SessionError::Invalid(_) => {
            ApiResponse::unauthorized("INVALID_SESSION", "Invalid or expired session")
        }
        SessionError::Revoked => ApiResponse::unauthorized("SESSION_REVOKED", "Session has ended"),
        SessionError::Store(reason) => {
            error!(error = %reason, "Session refresh failed");
            ApiResponse::internal_error()
        }
    };
    create_api_error(response)
}

type SessionFuture<T> = Pin<Box<dyn Future<Output = Result<T, ActixError>>>>;

/// Verifies and refreshes the request's session against the current user row.
///
/// The re-signed session is left in the request extensions; the request gate
/// writes it back as the `session` cookie.
fn resolve(req: &HttpRequest) -> SessionFuture<IssuedSession> {
    let state = req.app_data::<web::Data<AppState>>().cloned();
    let token = session_token(req);
    let req = req.clone();

    Box::pin(async move {
        let Some(state) = state else {
            return Err(create_api_error(ApiResponse::internal_error()));
        };
        let Some(token) = token else {
            return Err(create_api_error(ApiResponse::unauthorized(
                "MISSING_AUTH_HEADER",
                "Missing or invalid authorization header",
            )));
        };

        let session = state
            .sessions
            .refresh(&token)
            .await
            .map_err(session_error_response)?;

        req.extensions_mut().insert(session.clone());
        Ok(session)
    })
}

/// The refreshed session, re-signed token included.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub IssuedSession);

impl FromRequest for CurrentSession {
    type Error = ActixError;
    type Future = SessionFuture<Self>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let session = resolve(req);
        Box::pin(async move { session.await.map(CurrentSession) })
    }
}

impl FromRequest for SessionUser {
    type Error = ActixError;
    type Future = SessionFuture<Self>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let session = resolve(req);
        Box::pin(async move { session.await.map(|s| s.user) })
    }
}

/// A signed-in user holding the ADMIN role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub SessionUser);

impl FromRequest for AdminUser {
    type Error = ActixError;
    type Future = SessionFuture<Self>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let session = resolve(req);
        Box::pin(async move {
            let user = session.await?.user;
            if !user.is_admin() {
                return Err(create_api_error(ApiResponse::forbidden(
                    "ADMIN_REQUIRED",
                    "Unauthorized access: Admin privileges required for Entry",
                )));
            }
            Ok(AdminUser(user))
        })
    }
}
