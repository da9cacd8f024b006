pub mod jwt_session_service;
pub mod session_config;

pub use jwt_session_service::JwtSessionTokenService;
pub use session_config::SessionConfig;
