//! User directory
//!
//! The collaborator that owns user accounts. Authorization only needs to know
//! which role an account holds, how many accounts hold a role, and how to
//! point an account at a different role.

use crate::authz::types::{RoleId, UserId};
use crate::storage::database::Database;
use crate::utils::clock::Clock;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// User account as seen by authorization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// User ID
    pub id: UserId,
    /// Username
    pub username: String,
    /// Assigned role
    pub role_id: Option<RoleId>,
}

/// Account lookups authorization depends on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Number of accounts currently holding `role_id`
    async fn count_users_with_role(&self, role_id: RoleId) -> Result<u64>;

    /// Role held by an account; `None` when it has none
    async fn role_of(&self, user_id: UserId) -> Result<Option<RoleId>>;

    /// Point an account at a role. `NotFound` for an unknown user or role.
    async fn assign_role(&self, user_id: UserId, role_id: RoleId) -> Result<UserAccount>;
}

/// `UserDirectory` over the `users` table
#[derive(Debug, Clone)]
pub struct DatabaseUserDirectory {
    db: Arc<Database>,
    clock: Arc<dyn Clock>,
}

impl DatabaseUserDirectory {
    /// Create a directory over a database connection
    pub fn new(db: Arc<Database>, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    /// Register an account
    pub async fn create_user(&self, username: &str, role_id: Option<RoleId>) -> Result<UserAccount> {
        self.db
            .create_user_account(username, role_id, self.clock.now())
            .await
    }

    /// Find an account by ID
    pub async fn find_user(&self, user_id: UserId) -> Result<Option<UserAccount>> {
        self.db.find_user_account(user_id).await
    }

    /// Find an account by username
    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<UserAccount>> {
        self.db.find_user_account_by_username(username).await
    }
}

#[async_trait]
impl UserDirectory for DatabaseUserDirectory {
    async fn count_users_with_role(&self, role_id: RoleId) -> Result<u64> {
        self.db.count_users_with_role(role_id).await
    }

    async fn role_of(&self, user_id: UserId) -> Result<Option<RoleId>> {
        Ok(self
            .db
            .find_user_account(user_id)
            .await?
            .and_then(|account| account.role_id))
    }

    async fn assign_role(&self, user_id: UserId, role_id: RoleId) -> Result<UserAccount> {
        self.db.assign_user_role(user_id, role_id).await
    }
}
