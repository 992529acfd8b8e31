//! 考试存储操作

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::lessons::{lesson_filters, lessons_of_subject_matching};
use super::lookup::{self, LessonNames};
use super::{SeaOrmStorage, scope};
use crate::entity::prelude::*;
use crate::entity::exams;
use crate::errors::{Result, SchoolError};
use crate::models::exams::entities::{Exam, ExamListItem};
use crate::models::exams::requests::ExamRequest;
use crate::models::{PageRequest, PaginatedResponse};
use crate::policy::{ListFilter, Predicate};

pub(super) fn exam_condition(predicate: &Predicate) -> Condition {
    scope::scope_condition(
        predicate,
        |v| scope::lesson_scope(exams::Column::LessonId, v),
        None,
    )
}

fn apply_request(active: &mut ExamActiveModel, req: &ExamRequest) {
    active.title = Set(req.title.trim().to_string());
    active.start_time = Set(req.start_time.timestamp());
    active.end_time = Set(req.end_time.timestamp());
    active.lesson_id = Set(req.lesson_id);
}

impl SeaOrmStorage {
    pub async fn list_exams_impl(
        &self,
        predicate: &Predicate,
        filter: &ListFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<ExamListItem>> {
        let mut condition = Condition::all()
            .add(exam_condition(predicate))
            .add(lesson_filters(exams::Column::LessonId, filter));

        if let Some(ref search) = filter.search {
            condition = condition.add(
                Condition::any()
                    .add(scope::contains_ci(exams::Column::Title, search))
                    .add(exams::Column::LessonId.in_subquery(lessons_of_subject_matching(search))),
            );
        }

        let select = Exams::find()
            .filter(condition)
            .order_by_asc(exams::Column::Id);
        let (models, pagination) = self.fetch_page(select, page, "考试").await?;

        let lessons = lookup::lessons_by_id(&self.db, models.iter().map(|e| e.lesson_id)).await?;
        let names = LessonNames::load(&self.db, lessons.values()).await?;

        let items = models
            .into_iter()
            .map(|m| {
                let lesson = lessons.get(&m.lesson_id);
                ExamListItem {
                    subject_name: names.subject(lesson),
                    class_name: names.class(lesson),
                    teacher_name: names.teacher(lesson),
                    exam: m.into_exam(),
                }
            })
            .collect();

        Ok(PaginatedResponse { items, pagination })
    }

    pub async fn create_exam_impl(&self, req: ExamRequest) -> Result<Exam> {
        let mut active = <ExamActiveModel as sea_orm::ActiveModelTrait>::default();
        apply_request(&mut active, &req);

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("创建考试失败: {e}")))?;
        Ok(model.into_exam())
    }

    pub async fn update_exam_impl(&self, id: i64, req: ExamRequest) -> Result<Option<Exam>> {
        let Some(existing) = Exams::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: ExamActiveModel = existing.into();
        apply_request(&mut active, &req);
        let model = active
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新考试失败: {e}")))?;
        Ok(Some(model.into_exam()))
    }

    /// 关联成绩的 exam_id 由外键置空
    pub async fn delete_exam_impl(&self, id: i64) -> Result<bool> {
        let result = Exams::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除考试失败: {e}")))?;
        Ok(result.rows_affected > 0)
    }
}
