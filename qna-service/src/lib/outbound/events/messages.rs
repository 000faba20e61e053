use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::user::events::AuditEvent;

/// Serializable audit record as written to the audit topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLogMessage {
    pub event_id: String,
    pub action: String,
    pub entity: String,
    pub entity_id: i64,
    pub timestamp: DateTime<Utc>,
}

impl From<&AuditEvent> for AuditLogMessage {
    fn from(event: &AuditEvent) -> Self {
        Self {
            event_id: event.event_id.clone(),
            action: event.action.as_str().to_string(),
            entity: event.entity.as_str().to_string(),
            entity_id: event.entity_id,
            timestamp: event.timestamp,
        }
    }
}
