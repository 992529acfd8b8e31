//! 作业存储操作

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::lessons::{lesson_filters, lessons_of_subject_matching};
use super::lookup::{self, LessonNames};
use super::{SeaOrmStorage, scope};
use crate::entity::assignments;
use crate::entity::prelude::*;
use crate::errors::{Result, SchoolError};
use crate::models::assignments::entities::{Assignment, AssignmentListItem};
use crate::models::assignments::requests::AssignmentRequest;
use crate::models::{PageRequest, PaginatedResponse};
use crate::policy::{ListFilter, Predicate};

pub(super) fn assignment_condition(predicate: &Predicate) -> Condition {
    scope::scope_condition(
        predicate,
        |v| scope::lesson_scope(assignments::Column::LessonId, v),
        None,
    )
}

fn apply_request(active: &mut AssignmentActiveModel, req: &AssignmentRequest) {
    active.title = Set(req.title.trim().to_string());
    active.start_date = Set(req.start_date.timestamp());
    active.end_date = Set(req.end_date.timestamp());
    active.lesson_id = Set(req.lesson_id);
}

impl SeaOrmStorage {
    pub async fn list_assignments_impl(
        &self,
        predicate: &Predicate,
        filter: &ListFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<AssignmentListItem>> {
        let mut condition = Condition::all()
            .add(assignment_condition(predicate))
            .add(lesson_filters(assignments::Column::LessonId, filter));

        if let Some(ref search) = filter.search {
            condition = condition.add(
                Condition::any()
                    .add(scope::contains_ci(assignments::Column::Title, search))
                    .add(
                        assignments::Column::LessonId
                            .in_subquery(lessons_of_subject_matching(search)),
                    ),
            );
        }

        let select = Assignments::find()
            .filter(condition)
            .order_by_asc(assignments::Column::Id);
        let (models, pagination) = self.fetch_page(select, page, "作业").await?;

        let lessons = lookup::lessons_by_id(&self.db, models.iter().map(|a| a.lesson_id)).await?;
        let names = LessonNames::load(&self.db, lessons.values()).await?;

        let items = models
            .into_iter()
            .map(|m| {
                let lesson = lessons.get(&m.lesson_id);
                AssignmentListItem {
                    subject_name: names.subject(lesson),
                    class_name: names.class(lesson),
                    teacher_name: names.teacher(lesson),
                    assignment: m.into_assignment(),
                }
            })
            .collect();

        Ok(PaginatedResponse { items, pagination })
    }

    pub async fn create_assignment_impl(&self, req: AssignmentRequest) -> Result<Assignment> {
        let mut active = <AssignmentActiveModel as sea_orm::ActiveModelTrait>::default();
        apply_request(&mut active, &req);

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("创建作业失败: {e}")))?;
        Ok(model.into_assignment())
    }

    pub async fn update_assignment_impl(
        &self,
        id: i64,
        req: AssignmentRequest,
    ) -> Result<Option<Assignment>> {
        let Some(existing) = Assignments::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: AssignmentActiveModel = existing.into();
        apply_request(&mut active, &req);
        let model = active
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新作业失败: {e}")))?;
        Ok(Some(model.into_assignment()))
    }

    /// 关联成绩的 assignment_id 由外键置空
    pub async fn delete_assignment_impl(&self, id: i64) -> Result<bool> {
        let result = Assignments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除作业失败: {e}")))?;
        Ok(result.rows_affected > 0)
    }
}
