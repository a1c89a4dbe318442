//! Authorization sessions
//!
//! A session is an in-memory snapshot of one login's effective permissions and
//! the single checkpoint every privileged action consults.

mod implications;
mod manager;
mod opener;
mod session;

pub use implications::ImplicationTable;
pub use manager::SessionManager;
pub use opener::SessionOpener;
pub use session::{AuthenticatedUser, AuthzSession};
