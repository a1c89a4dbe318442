use crate::authz::catalog::Permission;
use crate::utils::error::{AuthzError, Result};
use sea_orm::*;
use std::collections::BTreeSet;
use tracing::debug;

use super::super::entities::{self, permission};
use super::types::SeaOrmDatabase;

/// Catalog ordering: category, then name, then id
pub(super) fn catalog_order(select: Select<entities::Permission>) -> Select<entities::Permission> {
    select
        .order_by_asc(permission::Column::Category)
        .order_by_asc(permission::Column::Name)
        .order_by_asc(permission::Column::Id)
}

impl SeaOrmDatabase {
    /// List every permission in catalog order
    pub async fn list_permissions(&self) -> Result<Vec<Permission>> {
        debug!("Listing permission catalog");

        let models = catalog_order(entities::Permission::find())
            .all(&self.db)
            .await?;

        Ok(models.iter().map(permission::Model::to_domain).collect())
    }

    /// Find permission by code
    pub async fn find_permission_by_code(&self, code: &str) -> Result<Option<Permission>> {
        debug!("Finding permission by code: {}", code);

        let model = entities::Permission::find()
            .filter(permission::Column::Code.eq(code))
            .one(&self.db)
            .await?;

        Ok(model.map(|m| m.to_domain()))
    }

    /// Find permission by ID
    pub async fn find_permission_by_id(&self, id: i32) -> Result<Option<Permission>> {
        debug!("Finding permission by ID: {}", id);

        let model = entities::Permission::find_by_id(id).one(&self.db).await?;
        Ok(model.map(|m| m.to_domain()))
    }

    /// Insert a permission, or refresh the cosmetic fields of an existing code
    pub async fn upsert_permission(
        &self,
        code: &str,
        name: &str,
        category: &str,
        description: Option<&str>,
    ) -> Result<Permission> {
        let existing = entities::Permission::find()
            .filter(permission::Column::Code.eq(code))
            .one(&self.db)
            .await?;

        let model = match existing {
            Some(model)
                if model.name == name
                    && model.category == category
                    && model.description.as_deref() == description =>
            {
                model
            }
            Some(model) => {
                debug!("Refreshing permission {}", code);
                let mut active: permission::ActiveModel = model.into();
                active.name = Set(name.to_string());
                active.category = Set(category.to_string());
                active.description = Set(description.map(str::to_string));
                active.update(&self.db).await?
            }
            None => {
                debug!("Installing permission {}", code);
                permission::ActiveModel {
                    code: Set(code.to_string()),
                    name: Set(name.to_string()),
                    category: Set(category.to_string()),
                    description: Set(description.map(str::to_string)),
                    ..Default::default()
                }
                .insert(&self.db)
                .await
                .map_err(|e| AuthzError::from_db_with_code(e, code))?
            }
        };

        Ok(model.to_domain())
    }

    /// IDs from `ids` that have no catalog row
    pub(super) async fn missing_permission_ids<C>(
        conn: &C,
        ids: &BTreeSet<i32>,
    ) -> Result<Vec<i32>>
    where
        C: ConnectionTrait,
    {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let found: BTreeSet<i32> = entities::Permission::find()
            .select_only()
            .column(permission::Column::Id)
            .filter(permission::Column::Id.is_in(ids.iter().copied()))
            .into_tuple::<i32>()
            .all(conn)
            .await?
            .into_iter()
            .collect();

        Ok(ids.difference(&found).copied().collect())
    }
}
