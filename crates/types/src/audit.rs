use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Mutation recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    CreateUser,
    UpdateUser,
    DeleteUser,
    CreateAsset,
    UpdateAsset,
    DeleteAsset,
    CreateIncident,
    UpdateIncident,
    DeleteIncident,
}

/// One append-only audit entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub action: AuditAction,
    pub entity_id: Uuid,
    /// Seconds since the Unix epoch.
    pub timestamp: f64,
}

impl AuditEvent {
    pub fn new(action: AuditAction, entity_id: Uuid) -> Self {
        Self::at(action, entity_id, SystemTime::now())
    }

    pub fn at(action: AuditAction, entity_id: Uuid, time: SystemTime) -> Self {
        let timestamp = time
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
        Self {
            action,
            entity_id,
            timestamp,
        }
    }
}
