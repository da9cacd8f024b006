pub mod auth_use_cases;
pub mod session_refresher;

pub use auth_use_cases::AuthUseCases;
pub use session_refresher::SessionRefresher;
