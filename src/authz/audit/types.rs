//! Audit ledger type definitions

use crate::authz::types::{AuditEntryId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Action codes recorded by this crate and its workflow collaborators
pub mod actions {
    pub const LOGIN: &str = "LOGIN";
    pub const LOGOUT: &str = "LOGOUT";
    pub const CREATE_ROLE: &str = "CREATE_ROLE";
    pub const UPDATE_ROLE: &str = "UPDATE_ROLE";
    pub const DELETE_ROLE: &str = "DELETE_ROLE";
    pub const SET_ROLE_PERMISSIONS: &str = "SET_ROLE_PERMISSIONS";
    pub const ASSIGN_ROLE: &str = "ASSIGN_ROLE";
    pub const PURGE_AUDIT_LOG: &str = "PURGE_AUDIT_LOG";
    pub const REQUEST_GATE_PASS: &str = "REQUEST_GATE_PASS";
    pub const APPROVE_GATE_PASS: &str = "APPROVE_GATE_PASS";
    pub const REJECT_GATE_PASS: &str = "REJECT_GATE_PASS";
    pub const CHANGE_PASSWORD: &str = "CHANGE_PASSWORD";
}

/// Entity type codes
pub mod entity_types {
    pub const USER: &str = "USER";
    pub const ROLE: &str = "ROLE";
    pub const AUDIT_LOG: &str = "AUDIT_LOG";
    pub const GATE_PASS: &str = "GATE_PASS";
}

/// One immutable ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: AuditEntryId,
    pub actor_user_id: UserId,
    pub actor_username: String,
    pub action: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<i64>,
    pub details: Option<String>,
    /// Assigned by the ledger when the entry is recorded
    pub timestamp: DateTime<Utc>,
}

/// An entry to append; the ledger assigns id and timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAuditEntry {
    pub actor_user_id: UserId,
    pub actor_username: String,
    pub action: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<i64>,
    pub details: Option<String>,
}

impl NewAuditEntry {
    pub fn new(
        actor_user_id: UserId,
        actor_username: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            actor_user_id,
            actor_username: actor_username.into(),
            action: action.into(),
            entity_type: None,
            entity_id: None,
            details: None,
        }
    }

    /// Attach the affected entity
    pub fn entity(mut self, entity_type: impl Into<String>, entity_id: Option<i64>) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = entity_id;
        self
    }

    /// Attach free-form details
    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Criteria for ledger queries; every set field must match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditFilter {
    /// Exact actor username
    pub actor: Option<String>,
    /// Exact action code
    pub action: Option<String>,
    /// Exact entity type
    pub entity_type: Option<String>,
    /// Inclusive lower bound
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound
    pub to: Option<DateTime<Utc>>,
    /// Case-insensitive substring of username, action, entity type or details
    pub search: Option<String>,
    /// Maximum number of entries yielded
    pub limit: Option<u64>,
}

impl AuditFilter {
    pub fn actor(mut self, username: impl Into<String>) -> Self {
        self.actor = Some(username.into());
        self
    }

    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn entity_type(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self
    }

    /// Both bounds inclusive
    pub fn between(mut self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    pub fn since(mut self, from: DateTime<Utc>) -> Self {
        self.from = Some(from);
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether an entry satisfies the filter, ignoring `limit`
    pub fn matches(&self, entry: &AuditEntry) -> bool {
        if self.actor.as_ref().is_some_and(|a| *a != entry.actor_username) {
            return false;
        }
        if self.action.as_ref().is_some_and(|a| *a != entry.action) {
            return false;
        }
        if self.entity_type.is_some() && self.entity_type != entry.entity_type {
            return false;
        }
        if self.from.is_some_and(|from| entry.timestamp < from) {
            return false;
        }
        if self.to.is_some_and(|to| entry.timestamp > to) {
            return false;
        }
        match self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(needle) => {
                let needle = needle.to_lowercase();
                [
                    Some(entry.actor_username.as_str()),
                    Some(entry.action.as_str()),
                    entry.entity_type.as_deref(),
                    entry.details.as_deref(),
                ]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&needle))
            }
            None => true,
        }
    }
}
