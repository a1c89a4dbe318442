//! Policy administration
//!
//! Every privileged mutation runs through a `PolicyGuard`: the session must
//! hold the operation's permission before storage is touched, and a
//! successful mutation leaves exactly one audit entry.

mod guard;
mod policy;

pub use guard::PolicyGuard;
pub use policy::PolicyAdmin;
