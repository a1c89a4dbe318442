//! Role type definitions

use crate::authz::catalog::Permission;
use crate::authz::types::{PermissionId, RoleId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Role definition with its resolved permissions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Role ID
    pub id: RoleId,
    /// Unique role code
    pub code: String,
    /// Display name
    pub name: String,
    /// Description
    pub description: Option<String>,
    /// System roles keep their code and permission set and cannot be deleted
    pub is_system_role: bool,
    /// Granted permissions, in catalog order
    pub permissions: Vec<Permission>,
}

impl Role {
    /// Codes of every granted permission
    pub fn permission_codes(&self) -> HashSet<String> {
        self.permissions.iter().map(|p| p.code.clone()).collect()
    }

    /// IDs of every granted permission
    pub fn permission_ids(&self) -> BTreeSet<PermissionId> {
        self.permissions.iter().map(|p| p.id).collect()
    }

    /// Whether the role grants `code` directly
    pub fn has_permission(&self, code: &str) -> bool {
        self.permissions.iter().any(|p| p.code == code)
    }
}

/// Fields of a role to create
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRole {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

impl NewRole {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Replacement values for an existing role's editable fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRole {
    pub id: RoleId,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

impl From<&Role> for UpdateRole {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id,
            code: role.code.clone(),
            name: role.name.clone(),
            description: role.description.clone(),
        }
    }
}
