use chrono::DateTime;
use chrono::Duration;
use chrono::SecondsFormat;
use chrono::Utc;
use pasetors::claims::Claims;
use pasetors::claims::ClaimsValidationRules;
use pasetors::keys::SymmetricKey;
use pasetors::local;
use pasetors::token::UntrustedToken;
use pasetors::version4::V4;
use pasetors::Local;
use uuid::Uuid;

use super::errors::TokenError;
use super::payload::TokenPayload;
use super::TokenManager;
use super::MIN_SECRET_LENGTH;

const USER_ID_CLAIM: &str = "user_id";
const ISSUED_AT_CLAIM: &str = "issued_at";
const EXPIRED_AT_CLAIM: &str = "expired_at";

/// PASETO v4.local tokens (XChaCha20 encryption with BLAKE2b authentication).
///
/// The key is the first 32 bytes of the configured secret.
pub struct PasetoTokenManager {
    key: SymmetricKey<V4>,
}

impl PasetoTokenManager {
    /// Create a PASETO token manager.
    ///
    /// # Arguments
    /// * `secret` - Symmetric key material, at least 32 bytes
    ///
    /// # Errors
    /// * `SecretTooShort` - The key material is shorter than 32 bytes
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(TokenError::SecretTooShort {
                min: MIN_SECRET_LENGTH,
                actual: secret.len(),
            });
        }

        let key = SymmetricKey::<V4>::from(&secret[..MIN_SECRET_LENGTH])
            .map_err(|e| TokenError::Invalid(e.to_string()))?;

        Ok(Self { key })
    }

    fn claims_for(payload: &TokenPayload) -> Result<Claims, pasetors::errors::Error> {
        let mut claims = Claims::new()?;
        claims.token_identifier(&payload.id.to_string())?;
        claims.issued_at(&rfc3339(payload.issued_at))?;
        claims.not_before(&rfc3339(payload.issued_at))?;
        claims.expiration(&rfc3339(payload.expired_at))?;
        claims.add_additional(USER_ID_CLAIM, payload.user_id)?;
        claims.add_additional(ISSUED_AT_CLAIM, payload.issued_at)?;
        claims.add_additional(EXPIRED_AT_CLAIM, payload.expired_at)?;
        Ok(claims)
    }
}

fn rfc3339(timestamp: i64) -> String {
    DateTime::<Utc>::from_timestamp(timestamp, 0)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn integer_claim(claims: &Claims, name: &str) -> Result<i64, TokenError> {
    claims
        .get_claim(name)
        .and_then(|value| value.as_i64())
        .ok_or_else(|| TokenError::Invalid(format!("missing claim: {}", name)))
}

impl TokenManager for PasetoTokenManager {
    fn create_token(&self, user_id: i64, duration: Duration) -> Result<String, TokenError> {
        let payload = TokenPayload::new(user_id, duration)?;
        let claims =
            Self::claims_for(&payload).map_err(|e| TokenError::CreationFailed(e.to_string()))?;

        local::encrypt(&self.key, &claims, None, None)
            .map_err(|e| TokenError::CreationFailed(e.to_string()))
    }

    fn decode_token(&self, token: &str) -> Result<TokenPayload, TokenError> {
        let untrusted = UntrustedToken::<Local, V4>::try_from(token)
            .map_err(|e| TokenError::Invalid(e.to_string()))?;

        // Expiry is enforced by `TokenPayload::check_expiry`.
        let mut rules = ClaimsValidationRules::new();
        rules.disable_valid_at();

        let trusted = local::decrypt(&self.key, &untrusted, &rules, None, None)
            .map_err(|e| TokenError::Invalid(e.to_string()))?;

        let claims = trusted
            .payload_claims()
            .ok_or_else(|| TokenError::Invalid("missing claims".to_string()))?;

        let id = claims
            .get_claim("jti")
            .and_then(|value| value.as_str())
            .and_then(|value| Uuid::parse_str(value).ok())
            .ok_or_else(|| TokenError::Invalid("missing claim: jti".to_string()))?;

        Ok(TokenPayload {
            id,
            user_id: integer_claim(claims, USER_ID_CLAIM)?,
            issued_at: integer_claim(claims, ISSUED_AT_CLAIM)?,
            expired_at: integer_claim(claims, EXPIRED_AT_CLAIM)?,
        })
    }
}
