//! Argon2id password hashing and verification.
//!
//! Digests use the PHC string format, so algorithm, work factor and salt are
//! embedded in the stored value. A digest produced under an older work factor
//! keeps verifying after the configured factor is raised.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHasher as _, PasswordVerifier as _, Version};

/// Argon2 cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkFactor {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes.
    pub iterations: u32,
    /// Degree of parallelism (lanes).
    pub parallelism: u32,
}

impl Default for WorkFactor {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HashError {
    #[error("invalid work factor: {0}")]
    WorkFactor(argon2::Error),

    #[error("malformed password digest: {0}")]
    MalformedDigest(argon2::password_hash::Error),

    #[error("password hashing failed: {0}")]
    Hashing(argon2::password_hash::Error),
}

/// One-way salted password hasher.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    pub fn new(work: WorkFactor) -> Result<Self, HashError> {
        let params = Params::new(work.memory_kib, work.iterations, work.parallelism, None)
            .map_err(HashError::WorkFactor)?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// Returns the PHC-formatted digest.
    pub fn hash(&self, password: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(HashError::Hashing)?;
        Ok(hash.to_string())
    }

    /// Verify a plaintext password against a stored PHC digest.
    ///
    /// The digest comparison is constant-time. Returns `Ok(false)` on a
    /// mismatch and `Err` only when `digest` cannot be parsed or names an
    /// algorithm this hasher does not support.
    pub fn verify(&self, password: &str, digest: &str) -> Result<bool, HashError> {
        let parsed = PasswordHash::new(digest).map_err(HashError::MalformedDigest)?;
        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(HashError::MalformedDigest(e)),
        }
    }
}
