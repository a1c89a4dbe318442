//! Integration tests for institute-authz
//!
//! These tests run the wired system against a real in-memory SQLite database
//! without mocking.

pub mod audit_ledger_tests;
pub mod policy_admin_tests;
pub mod role_store_tests;
pub mod session_tests;
