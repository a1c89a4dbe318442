//! Test fixtures and data factories

use chrono::{DateTime, Utc};
use institute_authz::NewAuditEntry;
use institute_authz::authz::audit::entity_types;
use institute_authz::authz::catalog::Permission;
use institute_authz::authz::types::{PermissionId, UserId};
use std::collections::BTreeSet;

/// Factory for audit entries
pub struct AuditEntryFactory;

impl AuditEntryFactory {
    /// Entry for `username` with the given action and details
    pub fn create(user_id: UserId, username: &str, action: &str, details: &str) -> NewAuditEntry {
        NewAuditEntry::new(user_id, username, action)
            .entity(entity_types::USER, Some(i64::from(user_id)))
            .details(details)
    }
}

/// Ids of the catalog permissions whose codes are listed
pub fn permission_ids(catalog: &[Permission], wanted: &[&str]) -> BTreeSet<PermissionId> {
    catalog
        .iter()
        .filter(|p| wanted.contains(&p.code.as_str()))
        .map(|p| p.id)
        .collect()
}

/// Timestamps in descending order
pub fn is_newest_first(timestamps: &[DateTime<Utc>]) -> bool {
    timestamps.windows(2).all(|pair| pair[0] >= pair[1])
}
