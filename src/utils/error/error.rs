//! Error handling for the authorization subsystem
//!
//! This module defines all error types used throughout the crate.

#![allow(missing_docs)]

use thiserror::Error;

/// Result type alias for the authorization subsystem
pub type Result<T> = std::result::Result<T, AuthzError>;

/// Main error type for the authorization subsystem
#[derive(Error, Debug)]
pub enum AuthzError {
    /// A role (or other coded record) with this code already exists
    #[error("Duplicate code: {0}")]
    DuplicateCode(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Attempt to re-key, re-permission or delete a system role
    #[error("System role is immutable: {0}")]
    SystemRoleImmutable(String),

    /// Role is still referenced by user accounts
    #[error("Role '{role}' is still assigned to {users} user account(s)")]
    HasDependents { role: String, users: u64 },

    /// Session open for a role that no longer exists
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// Caller's session lacks the required permission
    #[error("Forbidden: user '{username}' lacks permission {permission}")]
    Forbidden { username: String, permission: String },

    /// Storage failures (wraps any persistence error)
    #[error("Storage failure: {0}")]
    Storage(#[from] sea_orm::DbErr),

    /// The mutation was committed but its audit record could not be written
    #[error("Audit record for {action} (entity {entity_id:?}) was not written: {source}")]
    AuditWriteFailed {
        action: String,
        entity_id: Option<i64>,
        #[source]
        source: Box<AuthzError>,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// How callers are expected to treat an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Expected outcome; surface as an actionable message, never retry
    UserFacing,
    /// Infrastructure fault; must be recorded diagnostically
    Infrastructure,
}

impl AuthzError {
    /// Stable machine-readable code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthzError::DuplicateCode(_) => "DUPLICATE_CODE",
            AuthzError::NotFound(_) => "NOT_FOUND",
            AuthzError::SystemRoleImmutable(_) => "SYSTEM_ROLE_IMMUTABLE",
            AuthzError::HasDependents { .. } => "HAS_DEPENDENTS",
            AuthzError::UnknownRole(_) => "UNKNOWN_ROLE",
            AuthzError::Forbidden { .. } => "FORBIDDEN",
            AuthzError::Storage(_) => "STORAGE_FAILURE",
            AuthzError::AuditWriteFailed { .. } => "AUDIT_WRITE_FAILED",
            AuthzError::Config(_) => "CONFIG_ERROR",
            AuthzError::Validation(_) => "VALIDATION_ERROR",
            AuthzError::Yaml(_) => "YAML_ERROR",
            AuthzError::Io(_) => "IO_ERROR",
            AuthzError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Classify the error
    pub fn category(&self) -> ErrorCategory {
        match self {
            AuthzError::DuplicateCode(_)
            | AuthzError::NotFound(_)
            | AuthzError::SystemRoleImmutable(_)
            | AuthzError::HasDependents { .. }
            | AuthzError::UnknownRole(_)
            | AuthzError::Forbidden { .. }
            | AuthzError::Validation(_) => ErrorCategory::UserFacing,
            AuthzError::Storage(_)
            | AuthzError::AuditWriteFailed { .. }
            | AuthzError::Config(_)
            | AuthzError::Yaml(_)
            | AuthzError::Io(_)
            | AuthzError::Internal(_) => ErrorCategory::Infrastructure,
        }
    }

    /// Whether the error is an expected, user-facing outcome
    pub fn is_user_facing(&self) -> bool {
        self.category() == ErrorCategory::UserFacing
    }

    /// True when the underlying mutation already took effect
    pub fn mutation_committed(&self) -> bool {
        matches!(self, AuthzError::AuditWriteFailed { .. })
    }

    /// Map a storage error, turning unique-constraint violations into `DuplicateCode`
    pub fn from_db_with_code(err: sea_orm::DbErr, code: &str) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => {
                AuthzError::DuplicateCode(code.to_string())
            }
            _ => AuthzError::Storage(err),
        }
    }
}

impl AuthzError {
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    pub fn forbidden<U: Into<String>, P: Into<String>>(username: U, permission: P) -> Self {
        Self::Forbidden {
            username: username.into(),
            permission: permission.into(),
        }
    }
}
