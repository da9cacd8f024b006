pub mod argon2_hasher;
pub mod bcrypt_hasher;
pub mod hasher_config;

pub use argon2_hasher::Argon2Hasher;
pub use bcrypt_hasher::BcryptHasher;
pub use hasher_config::{HasherKind, PasswordHasherConfig};
