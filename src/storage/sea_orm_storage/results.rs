//! 成绩存储操作

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    QueryTrait, Set,
};

use super::lookup::{self, LessonNames};
use super::{SeaOrmStorage, scope};
use crate::entity::prelude::*;
use crate::entity::{assignments, exams, results, to_datetime};
use crate::errors::{Result, SchoolError};
use crate::models::results::entities::{ResultListItem, ResultRecord, ResultSource};
use crate::models::results::requests::ResultInput;
use crate::models::{PageRequest, PaginatedResponse};
use crate::policy::{ListFilter, Predicate, Visibility};

pub(super) fn result_condition(predicate: &Predicate) -> Condition {
    scope::scope_condition(
        predicate,
        |v| match v {
            Visibility::TaughtBy(t) => Some(
                Condition::any()
                    .add(
                        results::Column::ExamId
                            .in_subquery(scope::exams_in_lessons(scope::lessons_taught_by(t))),
                    )
                    .add(results::Column::AssignmentId.in_subquery(
                        scope::assignments_in_lessons(scope::lessons_taught_by(t)),
                    )),
            ),
            v => scope::student_scope(results::Column::StudentId, v),
        },
        None,
    )
}

fn search_condition(search: &str) -> Condition {
    let exams_titled = Exams::find()
        .select_only()
        .column(exams::Column::Id)
        .filter(scope::contains_ci(exams::Column::Title, search))
        .into_query();
    let assignments_titled = Assignments::find()
        .select_only()
        .column(assignments::Column::Id)
        .filter(scope::contains_ci(assignments::Column::Title, search))
        .into_query();

    Condition::any()
        .add(results::Column::ExamId.in_subquery(exams_titled))
        .add(results::Column::AssignmentId.in_subquery(assignments_titled))
        .add(results::Column::StudentId.in_subquery(scope::students_matching(search)))
}

/// 成绩来源的标题、开始时间与所属课程
struct SourceInfo {
    title: String,
    start_time: i64,
    lesson_id: i64,
}

fn apply_input(active: &mut ResultActiveModel, input: &ResultInput) {
    active.score = Set(input.score);
    active.exam_id = Set(input.source.exam_id());
    active.assignment_id = Set(input.source.assignment_id());
    active.student_id = Set(input.student_id);
}

impl SeaOrmStorage {
    /// 来源已全部删除的成绩不出现在 items 中，total 仍按存储计数
    pub async fn list_results_impl(
        &self,
        predicate: &Predicate,
        filter: &ListFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<ResultListItem>> {
        let mut condition = Condition::all().add(result_condition(predicate));

        if let Some(student_id) = filter.student_id {
            condition = condition.add(results::Column::StudentId.eq(student_id));
        }
        if let Some(ref search) = filter.search {
            condition = condition.add(search_condition(search));
        }

        let select = Results::find()
            .filter(condition)
            .order_by_asc(results::Column::Id);
        let (models, pagination) = self.fetch_page(select, page, "成绩").await?;

        let sources = self.result_sources(&models).await?;
        let lessons =
            lookup::lessons_by_id(&self.db, sources.values().map(|s| s.lesson_id)).await?;
        let names = LessonNames::load(&self.db, lessons.values()).await?;
        let students = lookup::student_names(&self.db, models.iter().map(|r| r.student_id)).await?;

        let items = models
            .into_iter()
            .filter_map(|m| {
                let source = ResultSource::from_columns(m.exam_id, m.assignment_id)?;
                let info = sources.get(&source)?;
                let lesson = lessons.get(&info.lesson_id);
                Some(ResultListItem {
                    id: m.id,
                    score: m.score,
                    source,
                    title: info.title.clone(),
                    student_id: m.student_id,
                    student_name: students.get(&m.student_id).cloned(),
                    teacher_name: names.teacher(lesson),
                    class_name: names.class(lesson),
                    start_time: to_datetime(info.start_time),
                })
            })
            .collect();

        Ok(PaginatedResponse { items, pagination })
    }

    async fn result_sources(
        &self,
        models: &[results::Model],
    ) -> Result<HashMap<ResultSource, SourceInfo>> {
        let exam_ids = lookup::id_set(models.iter().filter_map(|r| r.exam_id));
        let assignment_ids = lookup::id_set(models.iter().filter_map(|r| r.assignment_id));
        let mut sources = HashMap::new();

        if !exam_ids.is_empty() {
            let rows = Exams::find()
                .filter(exams::Column::Id.is_in(exam_ids))
                .all(&self.db)
                .await
                .map_err(|e| SchoolError::database_operation(format!("查询考试失败: {e}")))?;
            for exam in rows {
                sources.insert(
                    ResultSource::Exam(exam.id),
                    SourceInfo {
                        title: exam.title,
                        start_time: exam.start_time,
                        lesson_id: exam.lesson_id,
                    },
                );
            }
        }
        if !assignment_ids.is_empty() {
            let rows = Assignments::find()
                .filter(assignments::Column::Id.is_in(assignment_ids))
                .all(&self.db)
                .await
                .map_err(|e| SchoolError::database_operation(format!("查询作业失败: {e}")))?;
            for assignment in rows {
                sources.insert(
                    ResultSource::Assignment(assignment.id),
                    SourceInfo {
                        title: assignment.title,
                        start_time: assignment.start_date,
                        lesson_id: assignment.lesson_id,
                    },
                );
            }
        }

        Ok(sources)
    }

    pub async fn create_result_impl(&self, input: ResultInput) -> Result<ResultRecord> {
        let mut active = <ResultActiveModel as sea_orm::ActiveModelTrait>::default();
        apply_input(&mut active, &input);

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("创建成绩失败: {e}")))?;
        model
            .into_result()
            .ok_or_else(|| SchoolError::database_operation("成绩来源无效"))
    }

    pub async fn update_result_impl(
        &self,
        id: i64,
        input: ResultInput,
    ) -> Result<Option<ResultRecord>> {
        let Some(existing) = Results::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: ResultActiveModel = existing.into();
        apply_input(&mut active, &input);
        let model = active
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新成绩失败: {e}")))?;
        Ok(model.into_result())
    }

    pub async fn delete_result_impl(&self, id: i64) -> Result<bool> {
        let result = Results::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除成绩失败: {e}")))?;
        Ok(result.rows_affected > 0)
    }
}
