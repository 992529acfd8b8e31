//! 登录凭据存储操作

use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::entity::{admins, parents, students, teachers, users};
use crate::errors::{Result, SchoolError};
use crate::models::dashboard::responses::UserCounts;
use crate::models::users::entities::{Credential, ProfileSummary, Role, display_name};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
    TransactionTrait,
};

/// 写入凭据，返回新记录（其 ID 即档案 ID）
pub(super) async fn insert_credential<C: ConnectionTrait>(
    db: &C,
    username: &str,
    password_hash: &str,
    role: Role,
) -> Result<users::Model> {
    let now = chrono::Utc::now().timestamp();
    let model = UserActiveModel {
        username: Set(username.to_string()),
        password_hash: Set(password_hash.to_string()),
        role: Set(role.to_string()),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    model
        .insert(db)
        .await
        .map_err(|e| SchoolError::database_operation(format!("创建凭据失败: {e}")))
}

/// 同步凭据用户名，不修改密码
pub(super) async fn rename_credential<C: ConnectionTrait>(
    db: &C,
    id: i64,
    username: &str,
) -> Result<()> {
    let model = UserActiveModel {
        id: Set(id),
        username: Set(username.to_string()),
        updated_at: Set(chrono::Utc::now().timestamp()),
        ..Default::default()
    };
    model
        .update(db)
        .await
        .map_err(|e| SchoolError::database_operation(format!("更新凭据失败: {e}")))?;
    Ok(())
}

pub(super) async fn delete_credential<C: ConnectionTrait>(db: &C, id: i64) -> Result<u64> {
    let result = Users::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| SchoolError::database_operation(format!("删除凭据失败: {e}")))?;
    Ok(result.rows_affected)
}

impl SeaOrmStorage {
    pub async fn get_credential_by_id_impl(&self, id: i64) -> Result<Option<Credential>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询凭据失败: {e}")))?;

        Ok(result.and_then(|m| m.into_credential()))
    }

    pub async fn get_credential_by_username_impl(
        &self,
        username: &str,
    ) -> Result<Option<Credential>> {
        let result = Users::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询凭据失败: {e}")))?;

        Ok(result.and_then(|m| m.into_credential()))
    }

    pub async fn count_credentials_impl(&self) -> Result<u64> {
        Users::find()
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计凭据失败: {e}")))
    }

    /// 创建管理员凭据与档案
    pub async fn create_admin_impl(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<Credential> {
        let txn = self.db.begin().await?;

        let user = insert_credential(&txn, username, password_hash, Role::Admin).await?;
        admins::ActiveModel {
            id: Set(user.id),
            username: Set(user.username.clone()),
        }
        .insert(&txn)
        .await
        .map_err(|e| SchoolError::database_operation(format!("创建管理员失败: {e}")))?;

        txn.commit().await?;

        user.into_credential()
            .ok_or_else(|| SchoolError::database_operation("管理员凭据角色无效"))
    }

    /// 会话展示用名称：档案姓名，缺失时退回用户名
    pub async fn get_profile_summary_impl(
        &self,
        id: i64,
        role: Role,
    ) -> Result<Option<ProfileSummary>> {
        let summary = match role {
            Role::Admin => Admins::find_by_id(id)
                .one(&self.db)
                .await?
                .map(|m| ProfileSummary {
                    name: m.username,
                    img: None,
                }),
            Role::Teacher => Teachers::find_by_id(id)
                .one(&self.db)
                .await?
                .map(|m: teachers::Model| ProfileSummary {
                    name: display_name(&m.first_name, m.last_name.as_deref()),
                    img: m.img,
                }),
            Role::Student => Students::find_by_id(id)
                .one(&self.db)
                .await?
                .map(|m: students::Model| ProfileSummary {
                    name: m.display_name(),
                    img: m.img,
                }),
            Role::Parent => Parents::find_by_id(id)
                .one(&self.db)
                .await?
                .map(|m: parents::Model| ProfileSummary {
                    name: display_name(&m.first_name, Some(&m.last_name)),
                    img: m.img,
                }),
        };
        Ok(summary)
    }

    /// 各角色用户数，按凭据角色统计
    pub async fn count_users_by_role_impl(&self) -> Result<UserCounts> {
        let mut counts = UserCounts::default();
        for role in Role::all() {
            let count = Users::find()
                .filter(users::Column::Role.eq(role.to_string()))
                .count(&self.db)
                .await
                .map_err(|e| SchoolError::database_operation(format!("统计用户失败: {e}")))?;
            match role {
                Role::Admin => counts.admins = count,
                Role::Teacher => counts.teachers = count,
                Role::Student => counts.students = count,
                Role::Parent => counts.parents = count,
            }
        }
        Ok(counts)
    }
}
