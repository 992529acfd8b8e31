//! 家长档案存储操作

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use super::{SeaOrmStorage, scope, users};
use crate::entity::prelude::*;
use crate::entity::{parents, students};
use crate::errors::{Result, SchoolError};
use crate::models::parents::entities::{Parent, ParentListItem};
use crate::models::parents::requests::ParentInput;
use crate::models::users::entities::{NamedRef, Role};
use crate::models::{PageRequest, PaginatedResponse};
use crate::policy::{ListFilter, Predicate};

fn apply_input(active: &mut ParentActiveModel, input: &ParentInput) {
    active.username = Set(input.username.clone());
    active.email = Set(input.email.clone());
    active.first_name = Set(input.first_name.clone());
    active.last_name = Set(input.last_name.clone());
    active.phone = Set(input.phone.clone());
    active.address = Set(input.address.clone());
    active.img = Set(input.img.clone());
}

impl SeaOrmStorage {
    pub async fn list_parents_impl(
        &self,
        predicate: &Predicate,
        filter: &ListFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<ParentListItem>> {
        let mut condition = Condition::all().add(scope::flat_condition(predicate));

        if let Some(ref search) = filter.search {
            condition = condition.add(scope::any_contains(
                &[parents::Column::FirstName, parents::Column::LastName],
                search,
            ));
        }

        let select = Parents::find()
            .filter(condition)
            .order_by_asc(parents::Column::Id);
        let (models, pagination) = self.fetch_page(select, page, "家长").await?;

        let ids: Vec<i64> = models.iter().map(|p| p.id).collect();
        let children = if ids.is_empty() {
            Vec::new()
        } else {
            Students::find()
                .filter(students::Column::ParentId.is_in(ids))
                .order_by_asc(students::Column::Id)
                .all(&self.db)
                .await
                .map_err(|e| SchoolError::database_operation(format!("查询子女失败: {e}")))?
        };

        let mut grouped: HashMap<i64, Vec<NamedRef>> = HashMap::new();
        for child in children {
            if let Some(parent_id) = child.parent_id {
                grouped.entry(parent_id).or_default().push(NamedRef {
                    id: child.id,
                    name: child.display_name(),
                });
            }
        }

        let items = models
            .into_iter()
            .map(|m| ParentListItem {
                students: grouped.remove(&m.id).unwrap_or_default(),
                parent: m.into_parent(),
            })
            .collect();

        Ok(PaginatedResponse { items, pagination })
    }

    pub async fn create_parent_impl(
        &self,
        input: ParentInput,
        password_hash: String,
    ) -> Result<Parent> {
        let txn = self.db.begin().await?;

        let user =
            users::insert_credential(&txn, &input.username, &password_hash, Role::Parent).await?;

        let mut active = ParentActiveModel {
            id: Set(user.id),
            created_at: Set(user.created_at),
            ..Default::default()
        };
        apply_input(&mut active, &input);
        let model = active
            .insert(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("创建家长失败: {e}")))?;

        txn.commit().await?;
        Ok(model.into_parent())
    }

    pub async fn update_parent_impl(&self, id: i64, input: ParentInput) -> Result<Option<Parent>> {
        let txn = self.db.begin().await?;

        let Some(existing) = Parents::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let mut active: ParentActiveModel = existing.into();
        apply_input(&mut active, &input);
        let model = active
            .update(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新家长失败: {e}")))?;

        users::rename_credential(&txn, id, &input.username).await?;

        txn.commit().await?;
        Ok(Some(model.into_parent()))
    }

    /// 子女的 parent_id 由外键置空
    pub async fn delete_parent_impl(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;

        users::delete_credential(&txn, id).await?;
        let result = Parents::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除家长失败: {e}")))?;

        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }
}
