//! 教师档案存储操作

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, QueryTrait, Set, TransactionTrait,
};

use super::{SeaOrmStorage, lookup, scope, users};
use crate::entity::prelude::*;
use crate::entity::{date_to_timestamp, lessons, teacher_subjects, teachers};
use crate::errors::{Result, SchoolError};
use crate::models::teachers::entities::{Teacher, TeacherDetail, TeacherListItem};
use crate::models::teachers::requests::TeacherInput;
use crate::models::users::entities::{NamedRef, Role};
use crate::models::{PageRequest, PaginatedResponse};
use crate::policy::{ListFilter, Predicate, Visibility};

/// 整体替换教师的科目集合
async fn replace_subjects<C: ConnectionTrait>(
    db: &C,
    teacher_id: i64,
    subject_ids: &[i64],
) -> Result<()> {
    TeacherSubjects::delete_many()
        .filter(teacher_subjects::Column::TeacherId.eq(teacher_id))
        .exec(db)
        .await
        .map_err(|e| SchoolError::database_operation(format!("清除教师科目失败: {e}")))?;

    if subject_ids.is_empty() {
        return Ok(());
    }

    let links = subject_ids.iter().map(|subject_id| TeacherSubjectActiveModel {
        teacher_id: Set(teacher_id),
        subject_id: Set(*subject_id),
    });
    TeacherSubjects::insert_many(links)
        .exec(db)
        .await
        .map_err(|e| SchoolError::database_operation(format!("写入教师科目失败: {e}")))?;
    Ok(())
}

fn apply_input(active: &mut TeacherActiveModel, input: &TeacherInput) {
    active.username = Set(input.username.clone());
    active.email = Set(input.email.clone());
    active.first_name = Set(input.first_name.clone());
    active.last_name = Set(input.last_name.clone());
    active.phone = Set(input.phone.clone());
    active.address = Set(input.address.clone());
    active.blood_group = Set(input.blood_group.clone());
    active.birthday = Set(date_to_timestamp(input.birthday));
    active.gender = Set(input.gender.as_str().to_string());
    active.img = Set(input.img.clone());
}

impl SeaOrmStorage {
    pub async fn list_teachers_impl(
        &self,
        predicate: &Predicate,
        filter: &ListFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<TeacherListItem>> {
        let mut condition = Condition::all().add(scope::flat_condition(predicate));

        if let Some(class_id) = filter.class_id {
            let taught_in_class = Lessons::find()
                .select_only()
                .column(lessons::Column::TeacherId)
                .filter(lessons::Column::ClassId.eq(class_id))
                .into_query();
            condition = condition.add(teachers::Column::Id.in_subquery(taught_in_class));
        }
        if let Some(ref search) = filter.search {
            condition = condition.add(scope::any_contains(
                &[teachers::Column::FirstName, teachers::Column::LastName],
                search,
            ));
        }

        let select = Teachers::find()
            .filter(condition)
            .order_by_asc(teachers::Column::Id);
        let (models, pagination) = self.fetch_page(select, page, "教师").await?;

        let ids: Vec<i64> = models.iter().map(|t| t.id).collect();
        let mut subjects = self.subjects_of_teachers(&ids).await?;
        let mut classes = self.classes_of_teachers(&ids).await?;

        let items = models
            .into_iter()
            .map(|m| TeacherListItem {
                subjects: subjects.remove(&m.id).unwrap_or_default(),
                classes: classes.remove(&m.id).unwrap_or_default(),
                teacher: m.into_teacher(),
            })
            .collect();

        Ok(PaginatedResponse { items, pagination })
    }

    async fn subjects_of_teachers(&self, ids: &[i64]) -> Result<HashMap<i64, Vec<NamedRef>>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let links = TeacherSubjects::find()
            .filter(teacher_subjects::Column::TeacherId.is_in(ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师科目失败: {e}")))?;
        let names = lookup::subject_names(&self.db, links.iter().map(|l| l.subject_id)).await?;

        let mut grouped: HashMap<i64, Vec<NamedRef>> = HashMap::new();
        for link in links {
            if let Some(name) = names.get(&link.subject_id) {
                grouped.entry(link.teacher_id).or_default().push(NamedRef {
                    id: link.subject_id,
                    name: name.clone(),
                });
            }
        }
        Ok(grouped)
    }

    async fn classes_of_teachers(&self, ids: &[i64]) -> Result<HashMap<i64, Vec<NamedRef>>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let taught = Lessons::find()
            .filter(lessons::Column::TeacherId.is_in(ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师课程失败: {e}")))?;
        let names = lookup::class_names(&self.db, taught.iter().map(|l| l.class_id)).await?;

        let mut grouped: HashMap<i64, Vec<NamedRef>> = HashMap::new();
        for lesson in taught {
            let Some(name) = names.get(&lesson.class_id) else {
                continue;
            };
            let classes = grouped.entry(lesson.teacher_id).or_default();
            if !classes.iter().any(|c| c.id == lesson.class_id) {
                classes.push(NamedRef {
                    id: lesson.class_id,
                    name: name.clone(),
                });
            }
        }
        Ok(grouped)
    }

    pub async fn get_teacher_detail_impl(&self, id: i64) -> Result<Option<TeacherDetail>> {
        let Some(model) = Teachers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师失败: {e}")))?
        else {
            return Ok(None);
        };

        let subject_count = TeacherSubjects::find()
            .filter(teacher_subjects::Column::TeacherId.eq(id))
            .count(&self.db)
            .await?;
        let lesson_count = Lessons::find()
            .filter(lessons::Column::TeacherId.eq(id))
            .count(&self.db)
            .await?;
        let class_count = self
            .classes_of_teachers(&[id])
            .await?
            .get(&id)
            .map_or(0, |c| c.len() as u64);
        let schedule = self
            .list_schedule_impl(&Predicate {
                visibility: Visibility::TaughtBy(id),
                include_global: false,
            })
            .await?;

        Ok(Some(TeacherDetail {
            teacher: model.into_teacher(),
            subject_count,
            lesson_count,
            class_count,
            schedule,
        }))
    }

    /// 凭据、档案与科目在同一事务中写入
    pub async fn create_teacher_impl(
        &self,
        input: TeacherInput,
        password_hash: String,
    ) -> Result<Teacher> {
        let txn = self.db.begin().await?;

        let user =
            users::insert_credential(&txn, &input.username, &password_hash, Role::Teacher).await?;

        let mut active = TeacherActiveModel {
            id: Set(user.id),
            created_at: Set(user.created_at),
            ..Default::default()
        };
        apply_input(&mut active, &input);
        let model = active
            .insert(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("创建教师失败: {e}")))?;

        replace_subjects(&txn, model.id, &input.subjects).await?;

        txn.commit().await?;
        Ok(model.into_teacher())
    }

    /// 不修改密码，科目整体替换
    pub async fn update_teacher_impl(
        &self,
        id: i64,
        input: TeacherInput,
    ) -> Result<Option<Teacher>> {
        let txn = self.db.begin().await?;

        let Some(existing) = Teachers::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let mut active: TeacherActiveModel = existing.into();
        apply_input(&mut active, &input);
        let model = active
            .update(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新教师失败: {e}")))?;

        users::rename_credential(&txn, id, &input.username).await?;
        replace_subjects(&txn, id, &input.subjects).await?;

        txn.commit().await?;
        Ok(Some(model.into_teacher()))
    }

    /// 先删凭据再删档案；档案仍被课程引用时整个事务回滚
    pub async fn delete_teacher_impl(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;

        users::delete_credential(&txn, id).await?;
        let result = Teachers::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除教师失败: {e}")))?;

        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }
}
