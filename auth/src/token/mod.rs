pub mod errors;
pub mod jwt;
pub mod paseto;
pub mod payload;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

pub use errors::TokenError;
pub use jwt::JwtTokenManager;
pub use paseto::PasetoTokenManager;
pub use payload::TokenPayload;

/// Minimum key length accepted by every token manager.
pub const MIN_SECRET_LENGTH: usize = 32;

/// Issues and verifies access tokens.
///
/// Implementations only differ in how a `TokenPayload` is sealed. Expiry is
/// enforced the same way for all of them by the provided methods.
pub trait TokenManager: Send + Sync {
    /// Create a token for `user_id` that expires `duration` from now.
    fn create_token(&self, user_id: i64, duration: Duration) -> Result<String, TokenError>;

    /// Check structure and authenticity of `token` and extract its payload.
    ///
    /// Does not look at expiry.
    fn decode_token(&self, token: &str) -> Result<TokenPayload, TokenError>;

    /// Decode `token` and reject it if it has expired.
    fn verify_token(&self, token: &str) -> Result<TokenPayload, TokenError> {
        self.verify_token_at(token, Utc::now())
    }

    /// Decode `token` and reject it if it has expired at `now`.
    fn verify_token_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenPayload, TokenError> {
        let payload = self.decode_token(token)?;
        payload.check_expiry(now)?;
        Ok(payload)
    }
}

/// Token format selected at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenStrategy {
    #[default]
    Jwt,
    Paseto,
}

impl TokenStrategy {
    /// Build the token manager for this strategy.
    ///
    /// # Errors
    /// * `SecretTooShort` - The secret is shorter than `MIN_SECRET_LENGTH`
    pub fn build(self, secret: &[u8]) -> Result<Box<dyn TokenManager>, TokenError> {
        Ok(match self {
            TokenStrategy::Jwt => Box::new(JwtTokenManager::new(secret)?),
            TokenStrategy::Paseto => Box::new(PasetoTokenManager::new(secret)?),
        })
    }
}
