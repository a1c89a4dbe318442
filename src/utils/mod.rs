//! Utility modules
//!
//! - **error**: Error type, error categories and retry support
//! - **logging**: Subscriber installation
//! - **clock**: Injected time sources

pub mod clock; // Time sources
pub mod error; // Error handling
pub mod logging; // Logging setup

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{AuthzError, ErrorCategory, Result};

/// Truncate string to specified length with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
