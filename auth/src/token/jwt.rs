use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::errors::TokenError;
use super::payload::TokenPayload;
use super::TokenManager;
use super::MIN_SECRET_LENGTH;

/// HMAC-SHA256 signed JWT tokens.
pub struct JwtTokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenManager {
    /// Create a JWT token manager.
    ///
    /// # Arguments
    /// * `secret` - HMAC key, at least 32 bytes
    ///
    /// # Errors
    /// * `SecretTooShort` - The key is shorter than 32 bytes
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(TokenError::SecretTooShort {
                min: MIN_SECRET_LENGTH,
                actual: secret.len(),
            });
        }

        // Only HS256 is accepted. Expiry is checked by `TokenPayload`, not
        // by the library, so there is no leeway.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }
}

impl TokenManager for JwtTokenManager {
    fn create_token(&self, user_id: i64, duration: Duration) -> Result<String, TokenError> {
        let payload = TokenPayload::new(user_id, duration)?;

        encode(&Header::new(Algorithm::HS256), &payload, &self.encoding_key)
            .map_err(|e| TokenError::CreationFailed(e.to_string()))
    }

    fn decode_token(&self, token: &str) -> Result<TokenPayload, TokenError> {
        decode::<TokenPayload>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| TokenError::Invalid(e.to_string()))
    }
}
