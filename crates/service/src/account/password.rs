use argon2::password_hash::{PasswordHasher as _, PasswordVerifier as _, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHash, Version};
use rand::rngs::OsRng;

use crate::errors::ServiceError;

/// One-way, salted password hashing.
pub trait CredentialHasher: Send + Sync {
    /// Hash `plaintext` with a fresh random salt, returning a self-describing string.
    fn hash(&self, plaintext: &str) -> Result<String, ServiceError>;

    /// Check `plaintext` against a string produced by [`CredentialHasher::hash`].
    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, ServiceError>;

    fn algorithm(&self) -> &'static str;
}

/// Argon2id hasher producing PHC strings (`$argon2id$v=19$...`).
#[derive(Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, ServiceError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| ServiceError::Internal(format!("invalid argon2 params: {e}")))?;
        Ok(Self { params })
    }

    pub fn from_config(cfg: &configs::PasswordConfig) -> Result<Self, ServiceError> {
        Self::new(cfg.memory_kib, cfg.iterations, cfg.parallelism)
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self { Self { params: Params::default() } }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, plaintext: &str) -> Result<String, ServiceError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| ServiceError::Internal(format!("hashing error: {e}")))?
            .to_string();
        Ok(hash)
    }

    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, ServiceError> {
        // cost parameters come from the PHC string, not from `self`
        let parsed = PasswordHash::new(hash).map_err(|e| ServiceError::Internal(format!("stored hash unreadable: {e}")))?;
        Ok(self.argon2().verify_password(plaintext.as_bytes(), &parsed).is_ok())
    }

    fn algorithm(&self) -> &'static str { "argon2id" }
}
