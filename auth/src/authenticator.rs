use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::refresh::generate_refresh_token;
use crate::refresh::RefreshTokenError;
use crate::token::TokenError;
use crate::token::TokenManager;
use crate::token::TokenPayload;

/// Authentication coordinator combining password verification and token issuance.
///
/// Owns the password hasher, the configured token manager and the lifetimes
/// of access and refresh tokens.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_manager: Box<dyn TokenManager>,
    access_token_ttl: Duration,
    refresh_token_ttl: Duration,
}

/// Tokens issued for a successful sign-in or refresh.
#[derive(Debug, Clone)]
pub struct IssuedTokens {
    /// Signed or encrypted access token
    pub access_token: String,
    /// Opaque refresh token
    pub refresh_token: String,
    /// Instant after which the refresh token is rejected
    pub refresh_expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),

    #[error("Refresh token error: {0}")]
    RefreshTokenError(#[from] RefreshTokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `password_hasher` - Hasher used for stored credentials
    /// * `token_manager` - Access token implementation
    /// * `access_token_ttl` - Lifetime of access tokens
    /// * `refresh_token_ttl` - Lifetime of refresh tokens
    pub fn new(
        password_hasher: PasswordHasher,
        token_manager: Box<dyn TokenManager>,
        access_token_ttl: Duration,
        refresh_token_ttl: Duration,
    ) -> Self {
        Self {
            password_hasher,
            token_manager,
            access_token_ttl,
            refresh_token_ttl,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored digest.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue a token pair.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `user_id` - Subject of the issued tokens
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `TokenError` / `RefreshTokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: i64,
    ) -> Result<IssuedTokens, AuthenticationError> {
        if !self.verify_password(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        self.issue_tokens(user_id)
    }

    /// Issue a token pair without password verification.
    ///
    /// Used by refresh flows once the refresh token has been consumed.
    ///
    /// # Errors
    /// * `TokenError` - Access token creation failed
    /// * `RefreshTokenError` - Refresh token generation failed
    pub fn issue_tokens(&self, user_id: i64) -> Result<IssuedTokens, AuthenticationError> {
        let access_token = self
            .token_manager
            .create_token(user_id, self.access_token_ttl)?;
        let refresh_token = generate_refresh_token()?;

        Ok(IssuedTokens {
            access_token,
            refresh_token,
            refresh_expires_at: Utc::now() + self.refresh_token_ttl,
        })
    }

    /// Verify an access token.
    ///
    /// # Errors
    /// * `Invalid` - Token is malformed or not authentic
    /// * `Expired` - Token lifetime is over
    pub fn verify_token(&self, token: &str) -> Result<TokenPayload, TokenError> {
        self.token_manager.verify_token(token)
    }
}
