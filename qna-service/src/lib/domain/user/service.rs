use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::IssuedTokens;
use chrono::Utc;

use crate::domain::user::errors::AuthError;
use crate::domain::user::events::AuditEvent;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RefreshSession;
use crate::domain::user::models::SignInCommand;
use crate::domain::user::models::SignUpCommand;
use crate::domain::user::models::TokenPair;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::AuditLogger;
use crate::domain::user::ports::AuthServicePort;
use crate::domain::user::ports::RefreshSessionRepository;
use crate::domain::user::ports::UserRepository;

/// Domain service implementation for account and authentication operations.
///
/// Concrete implementation of AuthServicePort with dependency injection.
pub struct AuthService<UR, SR, AL>
where
    UR: UserRepository,
    SR: RefreshSessionRepository,
    AL: AuditLogger,
{
    users: Arc<UR>,
    sessions: Arc<SR>,
    audit_logger: Arc<AL>,
    authenticator: Arc<Authenticator>,
}

impl<UR, SR, AL> AuthService<UR, SR, AL>
where
    UR: UserRepository,
    SR: RefreshSessionRepository,
    AL: AuditLogger,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `users` - User persistence implementation
    /// * `sessions` - Refresh token persistence implementation
    /// * `audit_logger` - Audit log sink
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(
        users: Arc<UR>,
        sessions: Arc<SR>,
        audit_logger: Arc<AL>,
        authenticator: Arc<Authenticator>,
    ) -> Self {
        Self {
            users,
            sessions,
            audit_logger,
            authenticator,
        }
    }

    async fn store_session(
        &self,
        user_id: UserId,
        issued: IssuedTokens,
    ) -> Result<TokenPair, AuthError> {
        self.sessions
            .create(RefreshSession {
                user_id,
                token: issued.refresh_token.clone(),
                expires_at: issued.refresh_expires_at,
            })
            .await?;

        Ok(TokenPair {
            access_token: issued.access_token,
            refresh_token: issued.refresh_token,
            refresh_expires_at: issued.refresh_expires_at,
        })
    }
}

#[async_trait]
impl<UR, SR, AL> AuthServicePort for AuthService<UR, SR, AL>
where
    UR: UserRepository,
    SR: RefreshSessionRepository,
    AL: AuditLogger,
{
    async fn sign_up(&self, command: SignUpCommand) -> Result<User, AuthError> {
        if self
            .users
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            tracing::warn!(email = %command.email, "Sign-up rejected: email already registered");
            return Err(AuthError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self
            .authenticator
            .hash_password(command.password.expose())?;

        let user = self
            .users
            .create(NewUser {
                name: command.name,
                email: command.email,
                password_hash,
            })
            .await?;

        self.audit_logger
            .log(&AuditEvent::user_registered(&user))
            .await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    async fn sign_in(&self, command: SignInCommand) -> Result<TokenPair, AuthError> {
        let Some(user) = self.users.find_by_email(&command.email).await? else {
            tracing::warn!("Sign-in rejected: wrong user or password");
            return Err(AuthError::InvalidCredentials);
        };

        let issued = self
            .authenticator
            .authenticate(&command.password, &user.password_hash, user.id.as_i64())
            .map_err(|e| {
                if matches!(e, auth::AuthenticationError::InvalidCredentials) {
                    tracing::warn!("Sign-in rejected: wrong user or password");
                }
                AuthError::from(e)
            })?;

        let tokens = self.store_session(user.id, issued).await?;

        self.audit_logger
            .log(&AuditEvent::user_logged_in(user.id))
            .await?;

        tracing::info!(user_id = %user.id, "User signed in");
        Ok(tokens)
    }

    fn verify_token(&self, token: &str) -> Result<UserId, AuthError> {
        let payload = self.authenticator.verify_token(token)?;

        UserId::new(payload.user_id)
            .map_err(|e| AuthError::InvalidToken(format!("bad subject: {}", e)))
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let session = self
            .sessions
            .consume(refresh_token)
            .await?
            .ok_or(AuthError::InvalidRefreshToken)?;

        if session.is_expired(Utc::now()) {
            tracing::warn!(user_id = %session.user_id, "Refresh rejected: token expired");
            return Err(AuthError::RefreshTokenExpired);
        }

        let issued = self
            .authenticator
            .issue_tokens(session.user_id.as_i64())?;
        let tokens = self.store_session(session.user_id, issued).await?;

        tracing::info!(user_id = %session.user_id, "Tokens refreshed");
        Ok(tokens)
    }

    async fn get_user(&self, id: UserId) -> Result<User, AuthError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound(id))
    }

    async fn delete_user(&self, id: UserId) -> Result<(), AuthError> {
        self.users.delete(id).await?;

        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}
