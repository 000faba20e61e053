use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::errors::TokenError;

/// Identity carried inside an access token.
///
/// Timestamps are unix seconds. A payload is valid strictly before
/// `expired_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    #[serde(rename = "jti")]
    pub id: Uuid,
    pub user_id: i64,
    #[serde(rename = "iat")]
    pub issued_at: i64,
    #[serde(rename = "exp")]
    pub expired_at: i64,
}

impl TokenPayload {
    /// Create a payload for `user_id` valid for `duration` from now.
    ///
    /// # Errors
    /// * `CreationFailed` - The OS random source could not produce a token id
    pub fn new(user_id: i64, duration: Duration) -> Result<Self, TokenError> {
        Self::new_at(user_id, duration, Utc::now())
    }

    /// Create a payload as if issued at `now`.
    pub fn new_at(
        user_id: i64,
        duration: Duration,
        now: DateTime<Utc>,
    ) -> Result<Self, TokenError> {
        let mut bytes = [0u8; 16];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| TokenError::CreationFailed(e.to_string()))?;

        let issued_at = now.timestamp();

        Ok(Self {
            id: uuid::Builder::from_random_bytes(bytes).into_uuid(),
            user_id,
            issued_at,
            expired_at: issued_at + duration.num_seconds(),
        })
    }

    /// Check the payload against the clock reading `now`.
    ///
    /// # Errors
    /// * `Expired` - `now` is at or past `expired_at`
    pub fn check_expiry(&self, now: DateTime<Utc>) -> Result<(), TokenError> {
        if now.timestamp() >= self.expired_at {
            return Err(TokenError::Expired);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_payload() {
        let payload = TokenPayload::new(42, Duration::minutes(15)).unwrap();

        assert_eq!(payload.user_id, 42);
        assert_eq!(payload.expired_at - payload.issued_at, 15 * 60);
        assert_eq!(payload.id.get_version_num(), 4);
    }

    #[test]
    fn test_payload_ids_are_unique() {
        let first = TokenPayload::new(1, Duration::minutes(1)).unwrap();
        let second = TokenPayload::new(1, Duration::minutes(1)).unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_check_expiry() {
        let now = Utc::now();
        let payload = TokenPayload::new_at(1, Duration::seconds(60), now).unwrap();

        assert!(payload.check_expiry(now).is_ok());
        assert!(payload.check_expiry(now + Duration::seconds(59)).is_ok());
        assert_eq!(
            payload.check_expiry(now + Duration::seconds(60)),
            Err(TokenError::Expired)
        );
        assert_eq!(
            payload.check_expiry(now + Duration::seconds(61)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_zero_duration_is_expired_immediately() {
        let now = Utc::now();
        let payload = TokenPayload::new_at(1, Duration::zero(), now).unwrap();
        assert_eq!(payload.check_expiry(now), Err(TokenError::Expired));
    }
}
