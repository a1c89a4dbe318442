//! Configuration validation
//!
//! - `trait_def`: Core Validate trait definition
//! - `storage_validators`: Database settings
//! - `authz_validators`: Implication table, audit and logging settings
//! - `tests`: Test suite for all validators

mod authz_validators;
mod storage_validators;
mod trait_def;

pub use trait_def::Validate;
