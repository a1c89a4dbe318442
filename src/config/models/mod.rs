//! Configuration data models
//!
//! This module defines all configuration structures used by the crate.

#![allow(missing_docs)]

pub mod audit;
pub mod authz;
pub mod logging;
pub mod settings;
pub mod storage;

// Re-export all configuration types
pub use audit::*;
pub use authz::*;
pub use logging::*;
pub use settings::*;
pub use storage::*;

/// Default maximum database connections
pub fn default_max_connections() -> u32 {
    10
}

/// Default connection timeout in seconds
pub fn default_connection_timeout() -> u64 {
    5
}

/// Default audit retention in days (six months, as the log viewer offers)
pub fn default_retention_days() -> u32 {
    180
}

/// Default audit page size for lazy queries
pub fn default_page_size() -> u64 {
    100
}

/// Default number of audit write retries after the first attempt
pub fn default_record_retries() -> u32 {
    2
}

/// Default base delay between audit write retries
pub fn default_retry_base_delay_ms() -> u64 {
    50
}

/// Default log level
pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}
