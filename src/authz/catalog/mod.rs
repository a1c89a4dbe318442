//! Permission catalog
//!
//! The fixed universe of permission codes, grouped by category. Read-only at
//! runtime; `bootstrap` installs and refreshes it.

mod bootstrap;
mod catalog;
pub mod codes;
mod defaults;
mod types;

pub use bootstrap::{BootstrapReport, bootstrap};
pub use catalog::{PermissionCatalog, group_by_category};
pub use defaults::{DEFAULT_PERMISSIONS, SYSTEM_ROLES, is_known_code};
pub use types::{Permission, PermissionDef, PermissionGroup, SystemRoleDef};
