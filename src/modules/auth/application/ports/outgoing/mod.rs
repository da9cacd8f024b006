pub mod account_repository;
pub mod password_hasher;
pub mod session_revocation_store;
pub mod session_token_provider;
pub mod token_store;
pub mod two_factor_confirmation_repository;
pub mod user_query;
pub mod user_repository;

pub use account_repository::{AccountRepository, AccountRepositoryError};
pub use password_hasher::{HashError, PasswordHasher};
pub use session_revocation_store::{RevocationError, SessionRevocationStore};
pub use session_token_provider::{SessionTokenProvider, SignedSession, TokenError};
pub use token_store::{TokenStore, TokenStoreError};
pub use two_factor_confirmation_repository::{
    ConfirmationRepositoryError, TwoFactorConfirmationRepository,
};
pub use user_query::{UserQuery, UserQueryError};
pub use user_repository::{UserRepository, UserRepositoryError};
