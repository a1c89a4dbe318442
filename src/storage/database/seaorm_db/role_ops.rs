use crate::authz::catalog::Permission;
use crate::authz::roles::{NewRole, Role, UpdateRole};
use crate::utils::error::{AuthzError, Result};
use chrono::{DateTime, Utc};
use sea_orm::*;
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, info};

use super::super::entities::{self, role, role_permission};
use super::permission_ops::catalog_order;
use super::types::SeaOrmDatabase;

/// Resolve a role's permissions through the junction, in catalog order
async fn load_permissions<C>(conn: &C, role_id: i32) -> Result<Vec<Permission>>
where
    C: ConnectionTrait,
{
    let models = catalog_order(
        entities::Permission::find()
            .inner_join(entities::RolePermission)
            .filter(role_permission::Column::RoleId.eq(role_id)),
    )
    .all(conn)
    .await?;

    Ok(models.iter().map(|m| m.to_domain()).collect())
}

async fn find_role_model<C>(conn: &C, id: i32) -> Result<role::Model>
where
    C: ConnectionTrait,
{
    entities::Role::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| AuthzError::not_found(format!("role {}", id)))
}

/// Replace the junction rows of one role
async fn write_permission_set<C>(conn: &C, role_id: i32, permission_ids: &BTreeSet<i32>) -> Result<()>
where
    C: ConnectionTrait,
{
    entities::RolePermission::delete_many()
        .filter(role_permission::Column::RoleId.eq(role_id))
        .exec(conn)
        .await?;

    if permission_ids.is_empty() {
        return Ok(());
    }

    let rows = permission_ids
        .iter()
        .map(|permission_id| role_permission::ActiveModel {
            role_id: Set(role_id),
            permission_id: Set(*permission_id),
        });
    entities::RolePermission::insert_many(rows).exec(conn).await?;
    Ok(())
}

impl SeaOrmDatabase {
    /// Find role by ID, permissions resolved
    pub async fn find_role_by_id(&self, id: i32) -> Result<Option<Role>> {
        debug!("Finding role by ID: {}", id);

        match entities::Role::find_by_id(id).one(&self.db).await? {
            Some(model) => {
                let permissions = load_permissions(&self.db, model.id).await?;
                Ok(Some(model.to_domain(permissions)))
            }
            None => Ok(None),
        }
    }

    /// Find role by code, permissions resolved
    pub async fn find_role_by_code(&self, code: &str) -> Result<Option<Role>> {
        debug!("Finding role by code: {}", code);

        let model = entities::Role::find()
            .filter(role::Column::Code.eq(code))
            .one(&self.db)
            .await?;

        match model {
            Some(model) => {
                let permissions = load_permissions(&self.db, model.id).await?;
                Ok(Some(model.to_domain(permissions)))
            }
            None => Ok(None),
        }
    }

    /// List every role ordered by name, then id
    pub async fn list_roles(&self) -> Result<Vec<Role>> {
        debug!("Listing roles");

        let roles = entities::Role::find()
            .order_by_asc(role::Column::Name)
            .order_by_asc(role::Column::Id)
            .all(&self.db)
            .await?;

        let catalog = catalog_order(entities::Permission::find())
            .all(&self.db)
            .await?;

        let mut grants: HashMap<i32, HashSet<i32>> = HashMap::new();
        for row in entities::RolePermission::find().all(&self.db).await? {
            grants.entry(row.role_id).or_default().insert(row.permission_id);
        }

        Ok(roles
            .iter()
            .map(|model| {
                let permissions = match grants.get(&model.id) {
                    Some(ids) => catalog
                        .iter()
                        .filter(|p| ids.contains(&p.id))
                        .map(|p| p.to_domain())
                        .collect(),
                    None => Vec::new(),
                };
                model.to_domain(permissions)
            })
            .collect())
    }

    /// Insert a role with an empty permission set
    pub async fn insert_role(
        &self,
        new_role: &NewRole,
        is_system_role: bool,
        now: DateTime<Utc>,
    ) -> Result<Role> {
        debug!("Creating role: {}", new_role.code);

        let exists = entities::Role::find()
            .filter(role::Column::Code.eq(new_role.code.as_str()))
            .count(&self.db)
            .await?;
        if exists > 0 {
            return Err(AuthzError::DuplicateCode(new_role.code.clone()));
        }

        let model = role::ActiveModel {
            code: Set(new_role.code.clone()),
            name: Set(new_role.name.clone()),
            description: Set(new_role.description.clone()),
            is_system_role: Set(is_system_role),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| AuthzError::from_db_with_code(e, &new_role.code))?;

        Ok(model.to_domain(Vec::new()))
    }

    /// Update code, name and description in one transaction
    pub async fn update_role(&self, update: &UpdateRole, now: DateTime<Utc>) -> Result<Role> {
        debug!("Updating role: {}", update.id);

        let txn = self.db.begin().await?;

        let current = find_role_model(&txn, update.id).await?;

        if current.code != update.code {
            if current.is_system_role {
                return Err(AuthzError::SystemRoleImmutable(current.code));
            }

            let taken = entities::Role::find()
                .filter(role::Column::Code.eq(update.code.as_str()))
                .filter(role::Column::Id.ne(update.id))
                .count(&txn)
                .await?;
            if taken > 0 {
                return Err(AuthzError::DuplicateCode(update.code.clone()));
            }
        }

        let mut active: role::ActiveModel = current.into();
        active.code = Set(update.code.clone());
        active.name = Set(update.name.clone());
        active.description = Set(update.description.clone());
        active.updated_at = Set(now);
        let model = active
            .update(&txn)
            .await
            .map_err(|e| AuthzError::from_db_with_code(e, &update.code))?;

        let permissions = load_permissions(&txn, model.id).await?;
        txn.commit().await?;

        Ok(model.to_domain(permissions))
    }

    /// Remove a non-system role and its junction rows in one transaction
    pub async fn delete_role(&self, id: i32) -> Result<Role> {
        debug!("Deleting role: {}", id);

        let txn = self.db.begin().await?;

        let model = find_role_model(&txn, id).await?;
        if model.is_system_role {
            return Err(AuthzError::SystemRoleImmutable(model.code));
        }
        let permissions = load_permissions(&txn, id).await?;

        entities::RolePermission::delete_many()
            .filter(role_permission::Column::RoleId.eq(id))
            .exec(&txn)
            .await?;
        entities::Role::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(model.to_domain(permissions))
    }

    /// Replace a role's permission set wholesale in one transaction
    pub async fn replace_role_permissions(
        &self,
        role_id: i32,
        permission_ids: &BTreeSet<i32>,
        now: DateTime<Utc>,
    ) -> Result<Role> {
        debug!(
            "Replacing permissions of role {} ({} grants)",
            role_id,
            permission_ids.len()
        );

        let txn = self.db.begin().await?;

        let model = find_role_model(&txn, role_id).await?;
        if model.is_system_role {
            return Err(AuthzError::SystemRoleImmutable(model.code));
        }

        let missing = Self::missing_permission_ids(&txn, permission_ids).await?;
        if !missing.is_empty() {
            return Err(AuthzError::not_found(format!("permission ids {:?}", missing)));
        }

        write_permission_set(&txn, role_id, permission_ids).await?;

        let mut active: role::ActiveModel = model.into();
        active.updated_at = Set(now);
        let model = active.update(&txn).await?;

        let permissions = load_permissions(&txn, role_id).await?;
        txn.commit().await?;

        Ok(model.to_domain(permissions))
    }

    /// Install or re-synchronise a system role and its permission set
    pub async fn sync_system_role(
        &self,
        definition: &NewRole,
        permission_ids: &BTreeSet<i32>,
        now: DateTime<Utc>,
    ) -> Result<Role> {
        let txn = self.db.begin().await?;

        let existing = entities::Role::find()
            .filter(role::Column::Code.eq(definition.code.as_str()))
            .one(&txn)
            .await?;

        let model = match existing {
            Some(model) if model.is_system_role => model,
            Some(model) => {
                info!("Promoting role {} to system role", model.code);
                let mut active: role::ActiveModel = model.into();
                active.is_system_role = Set(true);
                active.updated_at = Set(now);
                active.update(&txn).await?
            }
            None => {
                info!("Installing system role {}", definition.code);
                role::ActiveModel {
                    code: Set(definition.code.clone()),
                    name: Set(definition.name.clone()),
                    description: Set(definition.description.clone()),
                    is_system_role: Set(true),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&txn)
                .await
                .map_err(|e| AuthzError::from_db_with_code(e, &definition.code))?
            }
        };

        let current: BTreeSet<i32> = entities::RolePermission::find()
            .filter(role_permission::Column::RoleId.eq(model.id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|row| row.permission_id)
            .collect();
        if &current != permission_ids {
            debug!("Synchronising permissions of system role {}", model.code);
            write_permission_set(&txn, model.id, permission_ids).await?;
        }

        let permissions = load_permissions(&txn, model.id).await?;
        txn.commit().await?;

        Ok(model.to_domain(permissions))
    }
}
