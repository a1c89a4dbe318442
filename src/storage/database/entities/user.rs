use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User account database model
///
/// Only the columns authorization needs: the account and the role it holds.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// User ID
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Username (unique)
    #[sea_orm(unique)]
    pub username: String,

    /// Assigned role (optional)
    pub role_id: Option<i32>,

    /// Creation timestamp
    pub created_at: DateTimeUtc,
}

/// User entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Belongs to role relation
    #[sea_orm(
        belongs_to = "super::role::Entity",
        from = "Column::RoleId",
        to = "super::role::Column::Id"
    )]
    Role,
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert SeaORM model to domain user account
    pub fn to_domain(&self) -> crate::authz::directory::UserAccount {
        crate::authz::directory::UserAccount {
            id: self.id,
            username: self.username.clone(),
            role_id: self.role_id,
        }
    }
}
