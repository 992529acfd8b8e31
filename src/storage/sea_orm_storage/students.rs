//! 学生档案存储操作

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::{SeaOrmStorage, lookup, scope, users};
use crate::entity::prelude::*;
use crate::entity::{attendances, date_to_timestamp, lessons, students};
use crate::errors::{Result, SchoolError};
use crate::models::students::entities::{Student, StudentDetail, StudentListItem};
use crate::models::students::requests::StudentInput;
use crate::models::users::entities::Role;
use crate::models::{PageRequest, PaginatedResponse};
use crate::policy::{ListFilter, Predicate, Visibility};

pub(super) fn student_condition(predicate: &Predicate) -> Condition {
    scope::scope_condition(
        predicate,
        |v| match v {
            Visibility::OwnStudent(s) => Some(Condition::all().add(students::Column::Id.eq(s))),
            Visibility::ChildOf(p) => Some(Condition::all().add(students::Column::ParentId.eq(p))),
            v => scope::class_scope(students::Column::ClassId, v),
        },
        None,
    )
}

/// 班级人数已达容量时拒绝写入
async fn ensure_capacity<C: ConnectionTrait>(db: &C, class_id: i64) -> Result<()> {
    let class = Classes::find_by_id(class_id)
        .one(db)
        .await?
        .ok_or_else(|| SchoolError::not_found(format!("班级不存在: {class_id}")))?;
    let enrolled = Students::find()
        .filter(students::Column::ClassId.eq(class_id))
        .count(db)
        .await?;

    if enrolled >= class.capacity.max(0) as u64 {
        return Err(SchoolError::business_rule("Class capacity is full"));
    }
    Ok(())
}

fn apply_input(active: &mut StudentActiveModel, input: &StudentInput) {
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
    active.class_id = Set(input.class_id);
    active.grade_id = Set(input.grade_id);
    active.parent_id = Set(Some(input.parent_id));
}

impl SeaOrmStorage {
    pub async fn list_students_impl(
        &self,
        predicate: &Predicate,
        filter: &ListFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<StudentListItem>> {
        let mut condition = Condition::all().add(student_condition(predicate));

        if let Some(class_id) = filter.class_id {
            condition = condition.add(students::Column::ClassId.eq(class_id));
        }
        if let Some(teacher_id) = filter.teacher_id {
            condition = condition
                .add(students::Column::ClassId.in_subquery(scope::classes_taught_by(teacher_id)));
        }
        if let Some(ref search) = filter.search {
            condition = condition.add(scope::any_contains(
                &[students::Column::FirstName, students::Column::LastName],
                search,
            ));
        }

        let select = Students::find()
            .filter(condition)
            .order_by_asc(students::Column::Id);
        let (models, pagination) = self.fetch_page(select, page, "学生").await?;

        let class_names = lookup::class_names(&self.db, models.iter().map(|s| s.class_id)).await?;
        let grade_levels =
            lookup::grade_levels(&self.db, models.iter().map(|s| s.grade_id)).await?;

        let items = models
            .into_iter()
            .map(|m| StudentListItem {
                class_name: class_names.get(&m.class_id).cloned(),
                grade_level: grade_levels.get(&m.grade_id).copied(),
                student: m.into_student(),
            })
            .collect();

        Ok(PaginatedResponse { items, pagination })
    }

    pub async fn get_student_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生失败: {e}")))?;
        Ok(result.map(|m| m.into_student()))
    }

    /// 详情页：班级课表与 `attendance_since` 以来的出勤率
    pub async fn get_student_detail_impl(
        &self,
        id: i64,
        attendance_since: DateTime<Utc>,
    ) -> Result<Option<StudentDetail>> {
        let Some(model) = Students::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let class_name = lookup::class_names(&self.db, [model.class_id])
            .await?
            .remove(&model.class_id);
        let grade_level = lookup::grade_levels(&self.db, [model.grade_id])
            .await?
            .remove(&model.grade_id);
        let lesson_count = Lessons::find()
            .filter(lessons::Column::ClassId.eq(model.class_id))
            .count(&self.db)
            .await?;

        let since = Condition::all()
            .add(attendances::Column::StudentId.eq(id))
            .add(attendances::Column::Date.gte(attendance_since.timestamp()));
        let total = Attendances::find()
            .filter(since.clone())
            .count(&self.db)
            .await?;
        let present = Attendances::find()
            .filter(since.add(attendances::Column::Present.eq(true)))
            .count(&self.db)
            .await?;
        let attendance_percentage =
            (total > 0).then(|| (present as f64 / total as f64 * 100.0).round());

        let schedule = self
            .list_schedule_impl(&Predicate {
                visibility: Visibility::ClassEnrolls(id),
                include_global: false,
            })
            .await?;

        Ok(Some(StudentDetail {
            student: model.into_student(),
            class_name,
            grade_level,
            lesson_count,
            attendance_percentage,
            schedule,
        }))
    }

    /// 容量检查与写入在同一事务中完成
    pub async fn create_student_impl(
        &self,
        input: StudentInput,
        password_hash: String,
    ) -> Result<Student> {
        let txn = self.db.begin().await?;

        ensure_capacity(&txn, input.class_id).await?;

        let user =
            users::insert_credential(&txn, &input.username, &password_hash, Role::Student).await?;

        let mut active = StudentActiveModel {
            id: Set(user.id),
            created_at: Set(user.created_at),
            ..Default::default()
        };
        apply_input(&mut active, &input);
        let model = active
            .insert(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("创建学生失败: {e}")))?;

        txn.commit().await?;
        Ok(model.into_student())
    }

    /// 转班时检查新班级容量；不修改密码
    pub async fn update_student_impl(
        &self,
        id: i64,
        input: StudentInput,
    ) -> Result<Option<Student>> {
        let txn = self.db.begin().await?;

        let Some(existing) = Students::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };
        if existing.class_id != input.class_id {
            ensure_capacity(&txn, input.class_id).await?;
        }

        let mut active: StudentActiveModel = existing.into();
        apply_input(&mut active, &input);
        let model = active
            .update(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新学生失败: {e}")))?;

        users::rename_credential(&txn, id, &input.username).await?;

        txn.commit().await?;
        Ok(Some(model.into_student()))
    }

    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;

        users::delete_credential(&txn, id).await?;
        let result = Students::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除学生失败: {e}")))?;

        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn list_children_impl(&self, parent_id: i64) -> Result<Vec<Student>> {
        let models = Students::find()
            .filter(students::Column::ParentId.eq(parent_id))
            .order_by_asc(students::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询子女失败: {e}")))?;
        Ok(models.into_iter().map(|m| m.into_student()).collect())
    }
}
