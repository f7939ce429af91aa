use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

use crate::password::SALT_LEN;

/// Error type for random generation.
///
/// Raised only when the operating system's entropy source fails; callers
/// treat this as fatal to the operation and never retry.
#[derive(Debug, Clone, Error)]
pub enum RandomError {
    #[error("entropy source failure: {0}")]
    Entropy(String),
}

/// Generate a fresh per-credential salt.
pub fn generate_salt() -> Result<[u8; SALT_LEN], RandomError> {
    let mut salt = [0u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| RandomError::Entropy(e.to_string()))?;
    Ok(salt)
}

/// Generate `num_bytes` random bytes, hex-encoded (2 characters per byte).
pub fn generate_hex(num_bytes: usize) -> Result<String, RandomError> {
    let mut bytes = vec![0u8; num_bytes];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| RandomError::Entropy(e.to_string()))?;
    Ok(hex::encode(bytes))
}
