//! Role-based authorization and the audit ledger
//!
//! Leaf first: the permission catalog, roles owning permission sets,
//! per-login sessions, the append-only ledger, and the audited
//! administration operations built on all of them.

pub mod admin;
pub mod audit;
pub mod catalog;
pub mod directory;
pub mod roles;
pub mod session;
mod system;
#[cfg(test)]
pub(crate) mod test_support;
pub mod types;

pub use admin::{PolicyAdmin, PolicyGuard};
pub use audit::{
    AuditEntry, AuditFilter, AuditLedger, AuditLedgerExt, AuditStream, DatabaseAuditLedger,
    NewAuditEntry,
};
pub use catalog::{Permission, PermissionCatalog, PermissionGroup};
pub use directory::{DatabaseUserDirectory, UserAccount, UserDirectory};
pub use roles::{NewRole, Role, RoleStore, UpdateRole};
pub use session::{AuthenticatedUser, AuthzSession, ImplicationTable, SessionManager, SessionOpener};
pub use system::AuthzSystem;
pub use types::{AuditEntryId, PermissionId, RoleId, UserId};
