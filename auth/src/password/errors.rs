use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password secret must not be empty")]
    EmptySecret,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
