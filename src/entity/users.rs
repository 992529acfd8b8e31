//! 登录凭据实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 角色无法识别时返回 None，由调用方拒绝登录
    pub fn into_credential(self) -> Option<crate::models::users::entities::Credential> {
        use crate::models::users::entities::{Credential, Role};

        let role = self.role.parse::<Role>().ok()?;
        Some(Credential {
            id: self.id,
            username: self.username,
            password_hash: self.password_hash,
            role,
            is_active: self.is_active,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        })
    }
}
