//! Role store

use crate::authz::directory::UserDirectory;
use crate::authz::types::{PermissionId, RoleId, UserId};
use crate::storage::database::Database;
use crate::utils::clock::Clock;
use crate::utils::error::{AuthzError, Result};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::types::{NewRole, Role, UpdateRole};

/// Named roles and the permission sets they own
#[derive(Clone)]
pub struct RoleStore {
    db: Arc<Database>,
    directory: Arc<dyn UserDirectory>,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for RoleStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoleStore")
            .field("db", &self.db)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

fn validate_fields(code: &str, name: &str) -> Result<()> {
    if code.trim().is_empty() {
        return Err(AuthzError::validation("role code cannot be empty"));
    }
    if code.chars().any(char::is_whitespace) {
        return Err(AuthzError::validation(format!(
            "role code '{}' cannot contain whitespace",
            code
        )));
    }
    if name.trim().is_empty() {
        return Err(AuthzError::validation("role name cannot be empty"));
    }
    Ok(())
}

impl RoleStore {
    /// Create a role store
    pub fn new(db: Arc<Database>, directory: Arc<dyn UserDirectory>, clock: Arc<dyn Clock>) -> Self {
        Self {
            db,
            directory,
            clock,
        }
    }

    /// Create a non-system role with an empty permission set
    pub async fn create(&self, new_role: NewRole) -> Result<Role> {
        validate_fields(&new_role.code, &new_role.name)?;

        let role = self
            .db
            .insert_role(&new_role, false, self.clock.now())
            .await?;
        info!("Created role {} ({})", role.code, role.id);
        Ok(role)
    }

    /// Look up a role by code
    pub async fn get_by_code(&self, code: &str) -> Result<Role> {
        self.db
            .find_role_by_code(code)
            .await?
            .ok_or_else(|| AuthzError::not_found(format!("role {}", code)))
    }

    /// Look up a role by id
    pub async fn get_by_id(&self, id: RoleId) -> Result<Role> {
        self.db
            .find_role_by_id(id)
            .await?
            .ok_or_else(|| AuthzError::not_found(format!("role {}", id)))
    }

    /// Role held by a user account
    pub async fn get_for_user(&self, user_id: UserId) -> Result<Role> {
        let role_id = self
            .directory
            .role_of(user_id)
            .await?
            .ok_or_else(|| AuthzError::not_found(format!("role for user {}", user_id)))?;
        self.get_by_id(role_id).await
    }

    /// Rewrite code, name and description
    ///
    /// A system role keeps its code; its name and description stay editable.
    pub async fn update(&self, update: UpdateRole) -> Result<Role> {
        validate_fields(&update.code, &update.name)?;

        let role = self.db.update_role(&update, self.clock.now()).await?;
        info!("Updated role {} ({})", role.code, role.id);
        Ok(role)
    }

    /// Delete a non-system role no account references
    ///
    /// Returns the role as it was before removal.
    pub async fn delete(&self, id: RoleId) -> Result<Role> {
        let role = self.get_by_id(id).await?;
        if role.is_system_role {
            return Err(AuthzError::SystemRoleImmutable(role.code));
        }

        let users = self.directory.count_users_with_role(id).await?;
        if users > 0 {
            warn!(
                "Refusing to delete role {}: {} account(s) still hold it",
                role.code, users
            );
            return Err(AuthzError::HasDependents {
                role: role.code,
                users,
            });
        }

        let deleted = self.db.delete_role(id).await?;
        info!("Deleted role {} ({})", deleted.code, deleted.id);
        Ok(deleted)
    }

    /// Replace a role's permission set wholesale
    pub async fn set_permissions(
        &self,
        role_id: RoleId,
        permission_ids: &BTreeSet<PermissionId>,
    ) -> Result<Role> {
        let role = self
            .db
            .replace_role_permissions(role_id, permission_ids, self.clock.now())
            .await?;
        debug!(
            "Role {} now holds {} permissions",
            role.code,
            role.permissions.len()
        );
        Ok(role)
    }

    /// Every role, ordered by name then id
    pub async fn list_all(&self) -> Result<Vec<Role>> {
        self.db.list_roles().await
    }
}
