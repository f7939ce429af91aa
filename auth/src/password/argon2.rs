use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;
use subtle::ConstantTimeEq;

use super::errors::PasswordError;

/// Length of produced digests in bytes.
pub const HASH_LEN: usize = 32;

/// Length of per-credential salts in bytes.
pub const SALT_LEN: usize = 8;

const ITERATIONS: u32 = 3;
const MEMORY_KIB: u32 = 64 * 1024;
const PARALLELISM: u32 = 2;

/// Salted password hashing with fixed Argon2id cost parameters.
///
/// Deterministic for identical (secret, salt) inputs. Callers own salt
/// generation and storage; this type never invents a salt on its own.
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    pub fn new() -> Self {
        // The parameters are compile-time constants within the ranges the
        // argon2 crate accepts, so construction cannot fail at runtime.
        let params = Params::new(MEMORY_KIB, ITERATIONS, PARALLELISM, Some(HASH_LEN))
            .expect("fixed Argon2id parameters are valid");
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }

    /// Derive a digest from a secret and a salt.
    ///
    /// # Errors
    /// * `HashingFailed` - the salt is shorter than the algorithm allows, or
    ///   the derivation itself failed
    pub fn hash(&self, secret: &str, salt: &[u8]) -> Result<[u8; HASH_LEN], PasswordError> {
        let mut digest = [0u8; HASH_LEN];
        self.argon2
            .hash_password_into(secret.as_bytes(), salt, &mut digest)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;
        Ok(digest)
    }

    /// Recompute the digest for a presented secret and compare it to the
    /// stored one in constant time.
    pub fn verify(
        &self,
        secret: &str,
        salt: &[u8],
        expected: &[u8],
    ) -> Result<bool, PasswordError> {
        let digest = self.hash(secret, salt)?;
        Ok(digest[..].ct_eq(expected).into())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
