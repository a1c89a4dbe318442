//! Audited role, assignment and retention administration

use crate::authz::audit::{AuditFilter, AuditStream, actions, entity_types, retention_cutoff};
use crate::authz::catalog::codes;
use crate::authz::directory::{UserAccount, UserDirectory};
use crate::authz::roles::{NewRole, Role, RoleStore, UpdateRole};
use crate::authz::session::AuthzSession;
use crate::authz::types::{PermissionId, RoleId, UserId};
use crate::utils::clock::Clock;
use crate::utils::error::Result;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tracing::info;

use super::guard::PolicyGuard;

/// Privileged operations over roles, assignments and the ledger itself
///
/// Each mutation checks the caller's session first and, on success, leaves
/// exactly one audit entry behind.
#[derive(Clone)]
pub struct PolicyAdmin {
    roles: RoleStore,
    directory: Arc<dyn UserDirectory>,
    guard: PolicyGuard,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for PolicyAdmin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyAdmin")
            .field("roles", &self.roles)
            .field("guard", &self.guard)
            .finish_non_exhaustive()
    }
}

fn role_entity(id: RoleId) -> Option<i64> {
    Some(i64::from(id))
}

impl PolicyAdmin {
    pub fn new(
        roles: RoleStore,
        directory: Arc<dyn UserDirectory>,
        guard: PolicyGuard,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            roles,
            directory,
            guard,
            clock,
        }
    }

    pub fn guard(&self) -> &PolicyGuard {
        &self.guard
    }

    pub async fn create_role(&self, session: &AuthzSession, new_role: NewRole) -> Result<Role> {
        self.guard.authorize(session, codes::MANAGE_ROLES)?;

        let role = self.roles.create(new_role).await?;
        self.guard
            .record(
                PolicyGuard::entry(session, actions::CREATE_ROLE)
                    .entity(entity_types::ROLE, role_entity(role.id))
                    .details(format!("Created role {} ({})", role.code, role.name)),
            )
            .await?;
        Ok(role)
    }

    pub async fn update_role(&self, session: &AuthzSession, update: UpdateRole) -> Result<Role> {
        self.guard.authorize(session, codes::MANAGE_ROLES)?;

        let role = self.roles.update(update).await?;
        self.guard
            .record(
                PolicyGuard::entry(session, actions::UPDATE_ROLE)
                    .entity(entity_types::ROLE, role_entity(role.id))
                    .details(format!("Updated role {} ({})", role.code, role.name)),
            )
            .await?;
        Ok(role)
    }

    pub async fn delete_role(&self, session: &AuthzSession, id: RoleId) -> Result<Role> {
        self.guard.authorize(session, codes::MANAGE_ROLES)?;

        let role = self.roles.delete(id).await?;
        self.guard
            .record(
                PolicyGuard::entry(session, actions::DELETE_ROLE)
                    .entity(entity_types::ROLE, role_entity(role.id))
                    .details(format!("Deleted role {}", role.code)),
            )
            .await?;
        Ok(role)
    }

    pub async fn set_role_permissions(
        &self,
        session: &AuthzSession,
        role_id: RoleId,
        permission_ids: &BTreeSet<PermissionId>,
    ) -> Result<Role> {
        self.guard.authorize(session, codes::MANAGE_ROLES)?;

        let role = self.roles.set_permissions(role_id, permission_ids).await?;
        let granted: Vec<&str> = role.permissions.iter().map(|p| p.code.as_str()).collect();
        self.guard
            .record(
                PolicyGuard::entry(session, actions::SET_ROLE_PERMISSIONS)
                    .entity(entity_types::ROLE, role_entity(role.id))
                    .details(format!(
                        "Role {} now grants {} permission(s): {}",
                        role.code,
                        granted.len(),
                        granted.join(", ")
                    )),
            )
            .await?;
        Ok(role)
    }

    pub async fn assign_role_to_user(
        &self,
        session: &AuthzSession,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<UserAccount> {
        self.guard.authorize(session, codes::ASSIGN_ROLES)?;

        let role = self.roles.get_by_id(role_id).await?;
        let account = self.directory.assign_role(user_id, role_id).await?;
        info!("Assigned role {} to {}", role.code, account.username);

        self.guard
            .record(
                PolicyGuard::entry(session, actions::ASSIGN_ROLE)
                    .entity(entity_types::USER, Some(i64::from(account.id)))
                    .details(format!("Assigned role {} to {}", role.code, account.username)),
            )
            .await?;
        Ok(account)
    }

    /// Remove entries strictly older than `days` days
    ///
    /// The purge is recorded first; if that record cannot be written nothing
    /// is removed.
    pub async fn purge_audit_older_than(&self, session: &AuthzSession, days: u32) -> Result<u64> {
        self.guard.authorize(session, codes::PURGE_AUDIT_LOGS)?;

        let cutoff = retention_cutoff(self.clock.now(), days);
        self.guard
            .record_before(
                PolicyGuard::entry(session, actions::PURGE_AUDIT_LOG)
                    .entity(entity_types::AUDIT_LOG, None)
                    .details(format!(
                        "Removing entries older than {} days (before {})",
                        days,
                        cutoff.to_rfc3339()
                    )),
            )
            .await?;

        let removed = self.guard.ledger().purge_before(cutoff).await?;
        info!("{} purged {} audit entries", session.username(), removed);
        Ok(removed)
    }

    /// Read the ledger; not itself audited
    pub fn audit_entries(&self, session: &AuthzSession, filter: AuditFilter) -> Result<AuditStream> {
        self.guard.authorize(session, codes::VIEW_AUDIT_LOGS)?;
        Ok(self.guard.ledger().query(filter))
    }

    /// Count ledger entries for paging headers
    pub async fn count_audit_entries(&self, session: &AuthzSession, filter: AuditFilter) -> Result<u64> {
        self.guard.authorize(session, codes::VIEW_AUDIT_LOGS)?;
        self.guard.ledger().count(filter).await
    }
}
