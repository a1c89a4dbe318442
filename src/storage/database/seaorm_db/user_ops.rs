use crate::authz::directory::UserAccount;
use crate::utils::error::{AuthzError, Result};
use chrono::{DateTime, Utc};
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, user};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Create a user account
    pub async fn create_user_account(
        &self,
        username: &str,
        role_id: Option<i32>,
        now: DateTime<Utc>,
    ) -> Result<UserAccount> {
        debug!("Creating user account: {}", username);

        if let Some(role_id) = role_id {
            self.ensure_role_exists(role_id).await?;
        }

        let model = user::ActiveModel {
            username: Set(username.to_string()),
            role_id: Set(role_id),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| AuthzError::from_db_with_code(e, username))?;

        Ok(model.to_domain())
    }

    /// Find user account by ID
    pub async fn find_user_account(&self, user_id: i32) -> Result<Option<UserAccount>> {
        debug!("Finding user account by ID: {}", user_id);

        let model = entities::User::find_by_id(user_id).one(&self.db).await?;
        Ok(model.map(|m| m.to_domain()))
    }

    /// Find user account by username
    pub async fn find_user_account_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>> {
        debug!("Finding user account by username: {}", username);

        let model = entities::User::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?;
        Ok(model.map(|m| m.to_domain()))
    }

    /// Number of user accounts holding a role
    pub async fn count_users_with_role(&self, role_id: i32) -> Result<u64> {
        let count = entities::User::find()
            .filter(user::Column::RoleId.eq(role_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    /// Point a user account at a role
    pub async fn assign_user_role(&self, user_id: i32, role_id: i32) -> Result<UserAccount> {
        debug!("Assigning role {} to user {}", role_id, user_id);

        self.ensure_role_exists(role_id).await?;

        let model = entities::User::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AuthzError::not_found(format!("user {}", user_id)))?;

        let mut active: user::ActiveModel = model.into();
        active.role_id = Set(Some(role_id));
        let model = active.update(&self.db).await?;

        Ok(model.to_domain())
    }

    async fn ensure_role_exists(&self, role_id: i32) -> Result<()> {
        let exists = entities::Role::find_by_id(role_id).count(&self.db).await?;
        if exists == 0 {
            return Err(AuthzError::not_found(format!("role {}", role_id)));
        }
        Ok(())
    }
}
