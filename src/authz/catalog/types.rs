//! Permission catalog type definitions

use crate::authz::types::PermissionId;
use serde::{Deserialize, Serialize};

/// Permission definition
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    /// Permission ID
    pub id: PermissionId,
    /// Stable code checked at every call site
    pub code: String,
    /// Display name
    pub name: String,
    /// Catalog category
    pub category: String,
    /// Description
    pub description: Option<String>,
}

/// Permissions of one category, as shown by a role editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionGroup {
    /// Category name
    pub category: String,
    /// Permissions in catalog order
    pub permissions: Vec<Permission>,
}

/// Static description of a catalog entry installed at bootstrap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionDef {
    pub code: &'static str,
    pub name: &'static str,
    pub category: &'static str,
}

/// Static description of a system role installed at bootstrap
#[derive(Debug, Clone, Copy)]
pub struct SystemRoleDef {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Granted codes; `None` grants the whole catalog
    pub grants: Option<&'static [&'static str]>,
}
