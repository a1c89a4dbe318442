//! Error handling utilities
//!
//! This module provides the crate error type and retry support for audit writes.

pub mod error;
pub mod recovery;

// Re-export commonly used types and functions
pub use error::*;
pub use recovery::*;
