//! Identifier aliases shared across the authorization modules

/// User account identifier
pub type UserId = i32;
/// Role identifier
pub type RoleId = i32;
/// Permission identifier
pub type PermissionId = i32;
/// Audit entry identifier
pub type AuditEntryId = i64;
