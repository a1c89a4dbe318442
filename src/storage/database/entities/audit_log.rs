use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Audit log database model (append-only)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "audit_logs")]
pub struct Model {
    /// Entry ID
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Acting user's ID, stored by value
    pub actor_user_id: i32,

    /// Acting user's username, stored by value
    pub actor_username: String,

    /// Action code ("APPROVE_GATE_PASS", "DELETE_ROLE", ...)
    pub action: String,

    /// Affected entity type (optional)
    pub entity_type: Option<String>,

    /// Affected entity ID (optional)
    pub entity_id: Option<i64>,

    /// Free-form details (optional)
    #[sea_orm(column_type = "Text", nullable)]
    pub details: Option<String>,

    /// Server-assigned timestamp
    pub timestamp: DateTimeUtc,
}

/// Audit entries reference their actor by value only
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert SeaORM model to domain audit entry
    pub fn to_domain(&self) -> crate::authz::audit::AuditEntry {
        crate::authz::audit::AuditEntry {
            id: self.id,
            actor_user_id: self.actor_user_id,
            actor_username: self.actor_username.clone(),
            action: self.action.clone(),
            entity_type: self.entity_type.clone(),
            entity_id: self.entity_id,
            details: self.details.clone(),
            timestamp: self.timestamp,
        }
    }
}
