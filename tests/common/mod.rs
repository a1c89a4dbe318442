//! Common test utilities for institute-authz
//!
//! # Usage
//!
//! ```rust
//! use crate::common::{TestSystem, fixtures};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let system = TestSystem::new().await;
//!     let admin = system.login_admin().await;
//!     // ...
//! }
//! ```

pub mod database;
pub mod fixtures;

pub use database::{TestDatabase, TestSystem};

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err and return the error
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
