use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    /// Role ID
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Role code (unique)
    #[sea_orm(unique)]
    pub code: String,

    /// Display name
    pub name: String,

    /// Description (optional)
    pub description: Option<String>,

    /// Protected from re-keying, re-permissioning and deletion
    pub is_system_role: bool,

    /// Creation timestamp
    pub created_at: DateTimeUtc,

    /// Last update timestamp
    pub updated_at: DateTimeUtc,
}

/// Role entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Junction rows owned by this role
    #[sea_orm(has_many = "super::role_permission::Entity")]
    RolePermissions,

    /// User accounts holding this role
    #[sea_orm(has_many = "super::user::Entity")]
    Users,
}

impl Related<super::role_permission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RolePermissions.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::permission::Entity> for Entity {
    fn to() -> RelationDef {
        super::role_permission::Relation::Permission.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::role_permission::Relation::Role.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert SeaORM model to domain role with its resolved permissions
    pub fn to_domain(
        &self,
        permissions: Vec<crate::authz::catalog::Permission>,
    ) -> crate::authz::roles::Role {
        crate::authz::roles::Role {
            id: self.id,
            code: self.code.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            is_system_role: self.is_system_role,
            permissions,
        }
    }
}
