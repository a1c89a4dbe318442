// Module declarations
mod audit_ops;
mod connection;
mod permission_ops;
mod role_ops;
mod types;
mod user_ops;

// Re-export public types
pub use audit_ops::AuditCursor;
pub use types::{DatabaseBackendType, DatabaseStats, SeaOrmDatabase};
