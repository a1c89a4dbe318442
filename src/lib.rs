//! # institute-authz
//!
//! Role-based authorization and an append-only audit ledger for institute
//! management applications.
//!
//! ## Features
//!
//! - **Permission catalog**: a fixed universe of permission codes grouped by category
//! - **Roles**: named roles owning permission sets, with protected system roles
//! - **Sessions**: per-login permission snapshots checked without I/O
//! - **Audit ledger**: append-only record of privileged actions, queried lazily
//! - **Policy administration**: permission-gated, audited role and retention operations
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use institute_authz::authz::catalog::codes;
//! use institute_authz::{AuthenticatedUser, AuthzSystem, Config, NewRole};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/authz.yaml").await?;
//!     let (authz, _report) = AuthzSystem::start(&config).await?;
//!
//!     let session = authz
//!         .sessions
//!         .login(AuthenticatedUser::new(1, "admin", "ADMIN"))
//!         .await?;
//!
//!     if session.has_permission(codes::MANAGE_ROLES) {
//!         authz
//!             .admin
//!             .create_role(&session, NewRole::new("LIBRARIAN", "Librarian"))
//!             .await?;
//!     }
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod authz;
pub mod config;
pub mod storage;
pub mod utils;

// Re-export main types
pub use authz::{
    AuditEntry, AuditFilter, AuditLedger, AuditLedgerExt, AuthenticatedUser, AuthzSession,
    AuthzSystem, NewAuditEntry, NewRole, Permission, PermissionCatalog, PolicyAdmin, PolicyGuard,
    Role, RoleStore, SessionManager, UpdateRole,
};
pub use config::Config;
pub use utils::error::{AuthzError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Seconds since the epoch at build time
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: option_env!("BUILD_TIME").unwrap_or("unknown"),
            git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
            rust_version: option_env!("RUST_VERSION").unwrap_or("unknown"),
        }
    }
}

/// Build
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
