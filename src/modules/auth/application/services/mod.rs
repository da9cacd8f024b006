pub mod credential_verifier;
pub mod session_issuer;
pub mod sign_in_gate;
pub mod two_factor_challenge;

pub use credential_verifier::{CredentialError, CredentialVerifier};
pub use session_issuer::{SessionError, SessionIssuer};
pub use sign_in_gate::{SignInGate, SignInProvider};
pub use two_factor_challenge::TwoFactorChallenge;

use crate::auth::application::domain::outcome::AuthError;
use crate::auth::application::ports::outgoing::{
    AccountRepositoryError, ConfirmationRepositoryError, HashError, TokenStoreError,
    UserQueryError, UserRepositoryError,
};
use crate::email::application::ports::outgoing::AuthEmailError;

// Port faults are never user-facing.
macro_rules! unexpected_from {
    ($($err:ty),* $(,)?) => {
        $(
            impl From<$err> for AuthError {
                fn from(e: $err) -> Self {
                    AuthError::unexpected(e)
                }
            }
        )*
    };
}

unexpected_from!(
    TokenStoreError,
    UserQueryError,
    UserRepositoryError,
    AccountRepositoryError,
    ConfirmationRepositoryError,
    HashError,
    AuthEmailError,
    CredentialError,
    SessionError,
);
