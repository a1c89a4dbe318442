//! Role store
//!
//! Named, optionally system-protected roles owning permission sets.

mod store;
mod types;

pub use store::RoleStore;
pub use types::{NewRole, Role, UpdateRole};
