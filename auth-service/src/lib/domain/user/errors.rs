use thiserror::Error;

/// Error for user profile reads.
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),
}
