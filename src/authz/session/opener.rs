//! Session construction from the role store

use crate::authz::roles::RoleStore;
use crate::utils::clock::Clock;
use crate::utils::error::{AuthzError, Result};
use std::sync::Arc;
use tracing::{debug, warn};

use super::implications::ImplicationTable;
use super::session::{AuthenticatedUser, AuthzSession};

/// Resolves a login's role into a session snapshot
#[derive(Debug, Clone)]
pub struct SessionOpener {
    roles: RoleStore,
    implications: ImplicationTable,
    clock: Arc<dyn Clock>,
}

impl SessionOpener {
    pub fn new(roles: RoleStore, implications: ImplicationTable, clock: Arc<dyn Clock>) -> Self {
        Self {
            roles,
            implications,
            clock,
        }
    }

    /// Copy the role's permission set, expanded by implications, into a new session
    ///
    /// `UnknownRole` when the role no longer exists.
    pub async fn open(&self, user: AuthenticatedUser) -> Result<AuthzSession> {
        let role = match self.roles.get_by_code(&user.role_code).await {
            Ok(role) => role,
            Err(AuthzError::NotFound(_)) => {
                warn!(
                    "Login for {} references unknown role {}",
                    user.username, user.role_code
                );
                return Err(AuthzError::UnknownRole(user.role_code));
            }
            Err(e) => return Err(e),
        };

        let permissions = self.implications.expand(role.permission_codes());
        debug!(
            "Opened session for {} as {} with {} permissions",
            user.username,
            role.code,
            permissions.len()
        );

        Ok(AuthzSession::new(user, permissions, self.clock.now()))
    }
}
