use std::str::FromStr;
use std::sync::Arc;

use super::argon2_hasher::Argon2Hasher;
use super::bcrypt_hasher::{BcryptHasher, DEFAULT_BCRYPT_COST};
use crate::auth::application::config::{env_or, ConfigError};
use crate::auth::application::ports::outgoing::PasswordHasher;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HasherKind {
    #[default]
    Bcrypt,
    Argon2,
}

impl FromStr for HasherKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bcrypt" => Ok(HasherKind::Bcrypt),
            "argon2" | "argon2id" => Ok(HasherKind::Argon2),
            other => Err(format!("unknown password hasher '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PasswordHasherConfig {
    pub kind: HasherKind,
    pub bcrypt_cost: u32,
    pub argon2_memory_kib: u32,
    pub argon2_iterations: u32,
    pub argon2_parallelism: u32,
}

impl Default for PasswordHasherConfig {
    fn default() -> Self {
        Self {
            kind: HasherKind::Bcrypt,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            // Budget VPS friendly: 4MB memory, 3 iterations, 1 thread
            argon2_memory_kib: 4 * 1024,
            argon2_iterations: 3,
            argon2_parallelism: 1,
        }
    }
}

impl PasswordHasherConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let bcrypt_cost: u32 = env_or("BCRYPT_COST", defaults.bcrypt_cost)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::invalid("BCRYPT_COST", "must be between 4 and 31"));
        }

        Ok(Self {
            kind: env_or("PASSWORD_HASHER", defaults.kind)?,
            bcrypt_cost,
            argon2_memory_kib: env_or("ARGON2_MEMORY_KIB", defaults.argon2_memory_kib)?,
            argon2_iterations: env_or("ARGON2_ITERATIONS", defaults.argon2_iterations)?,
            argon2_parallelism: env_or("ARGON2_PARALLELISM", defaults.argon2_parallelism)?,
        })
    }

    pub fn build(&self) -> Result<Arc<dyn PasswordHasher + Send + Sync>, ConfigError> {
        let hasher: Arc<dyn PasswordHasher + Send + Sync> = match self.kind {
            HasherKind::Bcrypt => Arc::new(BcryptHasher::new(self.bcrypt_cost)),
            HasherKind::Argon2 => Arc::new(Argon2Hasher::with_params(
                self.argon2_memory_kib,
                self.argon2_iterations,
                self.argon2_parallelism,
            )?),
        };
        Ok(hasher)
    }
}
