//! Read-only access to the permission catalog

use crate::storage::database::Database;
use crate::utils::error::{AuthzError, Result};
use std::sync::Arc;

use super::types::{Permission, PermissionGroup};

/// Permission catalog backed by the `permissions` table
#[derive(Debug, Clone)]
pub struct PermissionCatalog {
    db: Arc<Database>,
}

impl PermissionCatalog {
    /// Create a catalog over a database connection
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Every permission, ordered by category, then name, then id
    pub async fn list_all(&self) -> Result<Vec<Permission>> {
        self.db.list_permissions().await
    }

    /// Permissions grouped by category, same ordering as `list_all`
    pub async fn list_grouped(&self) -> Result<Vec<PermissionGroup>> {
        Ok(group_by_category(self.list_all().await?))
    }

    /// Look up a permission by code
    pub async fn get_by_code(&self, code: &str) -> Result<Permission> {
        self.db
            .find_permission_by_code(code)
            .await?
            .ok_or_else(|| AuthzError::not_found(format!("permission {}", code)))
    }

    /// Look up a permission by id
    pub async fn get_by_id(&self, id: i32) -> Result<Permission> {
        self.db
            .find_permission_by_id(id)
            .await?
            .ok_or_else(|| AuthzError::not_found(format!("permission {}", id)))
    }
}

/// Split an ordered permission list into consecutive category runs
pub fn group_by_category(permissions: Vec<Permission>) -> Vec<PermissionGroup> {
    let mut groups: Vec<PermissionGroup> = Vec::new();
    for permission in permissions {
        match groups.last_mut() {
            Some(group) if group.category == permission.category => {
                group.permissions.push(permission)
            }
            _ => groups.push(PermissionGroup {
                category: permission.category.clone(),
                permissions: vec![permission],
            }),
        }
    }
    groups
}
