mod get_session;
mod login_user;
mod logout_user;
mod new_password;
mod register_user;
mod reset_password;
mod verify_email;

pub use get_session::{get_session_handler, SessionResponse};
pub use get_session::{__path_get_session_handler};
pub use login_user::{login_user_handler, SignedInResponse};
pub use login_user::{__path_login_user_handler};
pub use logout_user::logout_user_handler;
pub use logout_user::{__path_logout_user_handler};
pub use new_password::{new_password_handler, NewPasswordBody};
pub use new_password::{__path_new_password_handler};
pub use register_user::register_user_handler;
pub use register_user::{__path_register_user_handler};
pub use reset_password::reset_password_handler;
pub use reset_password::{__path_reset_password_handler};
pub use verify_email::{verify_email_handler, VerifyEmailQuery};
pub use verify_email::{__path_verify_email_handler};

use actix_web::HttpResponse;
use tracing::error;

use crate::auth::application::domain::outcome::{ActionResult, UnexpectedError};
use crate::shared::api::ApiResponse;

/// Action results go out as 200 bodies; only unexpected faults become a 500.
pub(crate) fn action_response(result: Result<ActionResult, UnexpectedError>) -> HttpResponse {
    match result {
        Ok(action) => HttpResponse::Ok().json(action),
        Err(e) => {
            error!(error = %e, "Auth action failed unexpectedly");
            ApiResponse::internal_error()
        }
    }
}
