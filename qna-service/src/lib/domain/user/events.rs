use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Action recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    Register,
    Login,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Register => "REGISTER",
            AuditAction::Login => "LOGIN",
        }
    }
}

/// Kind of entity an audit record refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditEntity {
    User,
}

impl AuditEntity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditEntity::User => "USER",
        }
    }
}

/// One audit log entry, emitted after account creation and sign-in.
#[derive(Debug, Clone)]
pub struct AuditEvent {
    pub event_id: String,
    pub action: AuditAction,
    pub entity: AuditEntity,
    pub entity_id: i64,
    pub timestamp: DateTime<Utc>,
}

impl AuditEvent {
    fn new(action: AuditAction, entity: AuditEntity, entity_id: i64) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            action,
            entity,
            entity_id,
            timestamp: Utc::now(),
        }
    }

    /// Record for a newly registered user.
    pub fn user_registered(user: &User) -> Self {
        Self::new(AuditAction::Register, AuditEntity::User, user.id.as_i64())
    }

    /// Record for a successful sign-in.
    pub fn user_logged_in(user_id: UserId) -> Self {
        Self::new(AuditAction::Login, AuditEntity::User, user_id.as_i64())
    }
}
