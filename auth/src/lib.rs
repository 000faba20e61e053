//! Authentication utilities library
//!
//! Provides credential infrastructure for the qna service:
//! - Password hashing (Argon2id keyed with a service secret)
//! - Access tokens with two interchangeable formats (JWT HS256, PASETO v4.local)
//! - Opaque refresh token generation
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new(b"pepper").unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{TokenManager, TokenStrategy};
//! use chrono::Duration;
//!
//! let manager = TokenStrategy::Paseto
//!     .build(b"secret_key_at_least_32_bytes_long!")
//!     .unwrap();
//! let token = manager.create_token(42, Duration::minutes(15)).unwrap();
//! let payload = manager.verify_token(&token).unwrap();
//! assert_eq!(payload.user_id, 42);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, PasswordHasher, TokenStrategy};
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(
//!     PasswordHasher::new(b"pepper").unwrap(),
//!     TokenStrategy::Jwt.build(b"secret_key_at_least_32_bytes_long!").unwrap(),
//!     Duration::minutes(15),
//!     Duration::days(30),
//! );
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue tokens
//! let tokens = auth.authenticate("password123", &hash, 1).unwrap();
//!
//! // Validate token
//! let payload = auth.verify_token(&tokens.access_token).unwrap();
//! assert_eq!(payload.user_id, 1);
//! ```

pub mod authenticator;
pub mod password;
pub mod refresh;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::IssuedTokens;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use refresh::generate_refresh_token;
pub use refresh::RefreshTokenError;
pub use token::JwtTokenManager;
pub use token::PasetoTokenManager;
pub use token::TokenError;
pub use token::TokenManager;
pub use token::TokenPayload;
pub use token::TokenStrategy;
