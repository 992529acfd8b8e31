//! 科目存储操作

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use super::{SeaOrmStorage, lookup, scope};
use crate::entity::prelude::*;
use crate::entity::{subjects, teacher_subjects};
use crate::errors::{Result, SchoolError};
use crate::models::subjects::entities::{Subject, SubjectListItem};
use crate::models::subjects::requests::SubjectRequest;
use crate::models::users::entities::NamedRef;
use crate::models::{PageRequest, PaginatedResponse};
use crate::policy::{ListFilter, Predicate};

/// 整体替换科目的任课教师
async fn replace_teachers<C: ConnectionTrait>(
    db: &C,
    subject_id: i64,
    teacher_ids: &[i64],
) -> Result<()> {
    TeacherSubjects::delete_many()
        .filter(teacher_subjects::Column::SubjectId.eq(subject_id))
        .exec(db)
        .await
        .map_err(|e| SchoolError::database_operation(format!("清除科目教师失败: {e}")))?;

    let teacher_ids = lookup::id_set(teacher_ids.iter().copied());
    if teacher_ids.is_empty() {
        return Ok(());
    }

    let links = teacher_ids.into_iter().map(|teacher_id| TeacherSubjectActiveModel {
        teacher_id: Set(teacher_id),
        subject_id: Set(subject_id),
    });
    TeacherSubjects::insert_many(links)
        .exec(db)
        .await
        .map_err(|e| SchoolError::database_operation(format!("写入科目教师失败: {e}")))?;
    Ok(())
}

impl SeaOrmStorage {
    pub async fn list_subjects_impl(
        &self,
        predicate: &Predicate,
        filter: &ListFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<SubjectListItem>> {
        let mut condition = Condition::all().add(scope::flat_condition(predicate));
        if let Some(ref search) = filter.search {
            condition = condition.add(scope::contains_ci(subjects::Column::Name, search));
        }

        let select = Subjects::find()
            .filter(condition)
            .order_by_asc(subjects::Column::Id);
        let (models, pagination) = self.fetch_page(select, page, "科目").await?;

        let ids: Vec<i64> = models.iter().map(|s| s.id).collect();
        let links = if ids.is_empty() {
            Vec::new()
        } else {
            TeacherSubjects::find()
                .filter(teacher_subjects::Column::SubjectId.is_in(ids))
                .all(&self.db)
                .await
                .map_err(|e| SchoolError::database_operation(format!("查询科目教师失败: {e}")))?
        };
        let names = lookup::teacher_names(&self.db, links.iter().map(|l| l.teacher_id)).await?;

        let mut grouped: HashMap<i64, Vec<NamedRef>> = HashMap::new();
        for link in links {
            if let Some(name) = names.get(&link.teacher_id) {
                grouped.entry(link.subject_id).or_default().push(NamedRef {
                    id: link.teacher_id,
                    name: name.clone(),
                });
            }
        }

        let items = models
            .into_iter()
            .map(|m| SubjectListItem {
                teachers: grouped.remove(&m.id).unwrap_or_default(),
                subject: m.into_subject(),
            })
            .collect();

        Ok(PaginatedResponse { items, pagination })
    }

    pub async fn create_subject_impl(&self, req: SubjectRequest) -> Result<Subject> {
        let txn = self.db.begin().await?;

        let model = SubjectActiveModel {
            name: Set(req.name.trim().to_string()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| SchoolError::database_operation(format!("创建科目失败: {e}")))?;
        replace_teachers(&txn, model.id, &req.teacher_ids).await?;

        txn.commit().await?;
        Ok(model.into_subject())
    }

    pub async fn update_subject_impl(
        &self,
        id: i64,
        req: SubjectRequest,
    ) -> Result<Option<Subject>> {
        let txn = self.db.begin().await?;

        let Some(existing) = Subjects::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };
        let mut active: SubjectActiveModel = existing.into();
        active.name = Set(req.name.trim().to_string());
        let model = active
            .update(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新科目失败: {e}")))?;
        replace_teachers(&txn, id, &req.teacher_ids).await?;

        txn.commit().await?;
        Ok(Some(model.into_subject()))
    }

    pub async fn delete_subject_impl(&self, id: i64) -> Result<bool> {
        let result = Subjects::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除科目失败: {e}")))?;
        Ok(result.rows_affected > 0)
    }
}
