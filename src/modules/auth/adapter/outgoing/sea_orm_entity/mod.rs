pub mod accounts;
pub mod auth_tokens;
pub mod two_factor_confirmations;
pub mod users;
