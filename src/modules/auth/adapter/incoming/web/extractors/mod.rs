mod session;

pub use session::{session_cookie, session_token, AdminUser, CurrentSession, SESSION_COOKIE};
