use thiserror::Error;

/// Error type for token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token secret must be at least {min} bytes, got {actual}")]
    SecretTooShort { min: usize, actual: usize },

    #[error("Failed to create token: {0}")]
    CreationFailed(String),

    #[error("Token is invalid: {0}")]
    Invalid(String),

    #[error("Token has expired")]
    Expired,
}
