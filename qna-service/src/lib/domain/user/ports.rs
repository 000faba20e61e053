use async_trait::async_trait;

use crate::domain::user::errors::AuditError;
use crate::domain::user::errors::AuthError;
use crate::domain::user::events::AuditEvent;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RefreshSession;
use crate::domain::user::models::SignInCommand;
use crate::domain::user::models::SignUpCommand;
use crate::domain::user::models::TokenPair;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for account and authentication operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Arguments
    /// * `command` - Validated name, email and password
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Credential` - Password hashing failed
    /// * `Audit` - Audit log emission failed
    /// * `DatabaseError` - Database operation failed
    async fn sign_up(&self, command: SignUpCommand) -> Result<User, AuthError>;

    /// Exchange credentials for an access and refresh token pair.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `Audit` - Audit log emission failed
    /// * `DatabaseError` - Database operation failed
    async fn sign_in(&self, command: SignInCommand) -> Result<TokenPair, AuthError>;

    /// Resolve an access token to the user it was issued for.
    ///
    /// # Errors
    /// * `InvalidToken` - Token is malformed, tampered or signed with another key
    /// * `TokenExpired` - Token lifetime is over
    fn verify_token(&self, token: &str) -> Result<UserId, AuthError>;

    /// Consume a refresh token and mint a new token pair.
    ///
    /// # Errors
    /// * `InvalidRefreshToken` - Token is unknown or already consumed
    /// * `RefreshTokenExpired` - Stored expiry is in the past
    /// * `DatabaseError` - Database operation failed
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: UserId) -> Result<User, AuthError>;

    /// Delete an account.
    ///
    /// # Errors
    /// * `DeleteFailed` - No row was deleted
    /// * `DatabaseError` - Database operation failed
    async fn delete_user(&self, id: UserId) -> Result<(), AuthError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Returns
    /// Created user with storage-assigned id and timestamps
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, AuthError>;

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AuthError>;

    /// Retrieve user by exact email address.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

    /// Remove user from storage.
    ///
    /// # Errors
    /// * `DeleteFailed` - No row was deleted
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: UserId) -> Result<(), AuthError>;
}

/// Persistence for refresh tokens, one active token per user.
#[async_trait]
pub trait RefreshSessionRepository: Send + Sync + 'static {
    /// Store `session`, replacing every other session of its user.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed (including constraint violations)
    async fn create(&self, session: RefreshSession) -> Result<(), AuthError>;

    /// Look up `token` and delete every session of its owner.
    ///
    /// # Returns
    /// The matching session, or `None` if no row matches
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn consume(&self, token: &str) -> Result<Option<RefreshSession>, AuthError>;
}

/// Audit log sink.
#[async_trait]
pub trait AuditLogger: Send + Sync + 'static {
    /// Record `event`.
    ///
    /// # Errors
    /// * `SerializationFailed` - Record could not be encoded
    /// * `PublishFailed` - Sink did not acknowledge the record
    async fn log(&self, event: &AuditEvent) -> Result<(), AuditError>;
}
