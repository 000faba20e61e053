use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

/// Number of random bytes in a refresh token.
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Error type for refresh token generation.
#[derive(Debug, Clone, Error)]
#[error("Failed to generate refresh token: {0}")]
pub struct RefreshTokenError(String);

/// Generate an opaque refresh token.
///
/// 32 bytes from the operating system CSPRNG, hex encoded.
///
/// # Errors
/// * `RefreshTokenError` - The OS random source failed
pub fn generate_refresh_token() -> Result<String, RefreshTokenError> {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| RefreshTokenError(e.to_string()))?;

    Ok(hex::encode(bytes))
}
