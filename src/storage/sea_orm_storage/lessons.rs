//! 课程与课表存储操作

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::lookup::LessonNames;
use super::{SeaOrmStorage, scope};
use crate::entity::lessons;
use crate::entity::prelude::*;
use crate::errors::{Result, SchoolError};
use crate::models::lessons::entities::{Day, Lesson, LessonListItem, ScheduleEntry};
use crate::models::lessons::requests::LessonRequest;
use crate::models::{PageRequest, PaginatedResponse};
use crate::policy::{ListFilter, Predicate, Visibility};

pub(super) fn lesson_condition(predicate: &Predicate) -> Condition {
    scope::scope_condition(
        predicate,
        |v| match v {
            Visibility::TaughtBy(t) => Some(Condition::all().add(lessons::Column::TeacherId.eq(t))),
            v => scope::class_scope(lessons::Column::ClassId, v),
        },
        None,
    )
}

/// 通过课程外键关联的记录：按班级、教师、课程筛选
pub(super) fn lesson_filters<C: ColumnTrait>(column: C, filter: &ListFilter) -> Condition {
    let mut condition = Condition::all();
    if let Some(class_id) = filter.class_id {
        condition = condition.add(column.in_subquery(scope::lessons_where(
            Condition::all().add(lessons::Column::ClassId.eq(class_id)),
        )));
    }
    if let Some(teacher_id) = filter.teacher_id {
        condition = condition.add(column.in_subquery(scope::lessons_taught_by(teacher_id)));
    }
    if let Some(lesson_id) = filter.lesson_id {
        condition = condition.add(column.eq(lesson_id));
    }
    condition
}

/// 科目名称匹配的课程
pub(super) fn lessons_of_subject_matching(search: &str) -> sea_orm::sea_query::SelectStatement {
    scope::lessons_where(
        Condition::all().add(lessons::Column::SubjectId.in_subquery(scope::subjects_matching(search))),
    )
}

fn apply_request(active: &mut LessonActiveModel, req: &LessonRequest, day: Day) {
    active.name = Set(req.name.trim().to_string());
    active.day = Set(day.as_str().to_string());
    active.start_time = Set(req.start_time.clone());
    active.end_time = Set(req.end_time.clone());
    active.subject_id = Set(req.subject_id);
    active.class_id = Set(req.class_id);
    active.teacher_id = Set(req.teacher_id);
}

impl SeaOrmStorage {
    pub async fn list_lessons_impl(
        &self,
        predicate: &Predicate,
        filter: &ListFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<LessonListItem>> {
        let mut condition = Condition::all().add(lesson_condition(predicate));

        if let Some(class_id) = filter.class_id {
            condition = condition.add(lessons::Column::ClassId.eq(class_id));
        }
        if let Some(teacher_id) = filter.teacher_id {
            condition = condition.add(lessons::Column::TeacherId.eq(teacher_id));
        }
        if let Some(ref search) = filter.search {
            condition = condition.add(
                Condition::any()
                    .add(lessons::Column::SubjectId.in_subquery(scope::subjects_matching(search)))
                    .add(lessons::Column::TeacherId.in_subquery(scope::teachers_matching(search))),
            );
        }

        let select = Lessons::find()
            .filter(condition)
            .order_by_asc(lessons::Column::Id);
        let (models, pagination) = self.fetch_page(select, page, "课程").await?;
        let names = LessonNames::load(&self.db, models.iter()).await?;

        let items = models
            .into_iter()
            .map(|m| LessonListItem {
                subject_name: names.subject(Some(&m)),
                class_name: names.class(Some(&m)),
                teacher_name: names.teacher(Some(&m)),
                lesson: m.into_lesson(),
            })
            .collect();

        Ok(PaginatedResponse { items, pagination })
    }

    /// 谓词范围内的全部课程，按星期与开始时间排序
    pub async fn list_schedule_impl(&self, predicate: &Predicate) -> Result<Vec<ScheduleEntry>> {
        let models = Lessons::find()
            .filter(lesson_condition(predicate))
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询课表失败: {e}")))?;
        let names = LessonNames::load(&self.db, models.iter()).await?;

        let mut schedule: Vec<ScheduleEntry> = models
            .into_iter()
            .map(|m| ScheduleEntry {
                subject_name: names.subject(Some(&m)),
                class_name: names.class(Some(&m)),
                lesson_id: m.id,
                title: m.name.clone(),
                day: m.day.parse().unwrap_or(Day::Monday),
                start_time: m.start_time,
                end_time: m.end_time,
            })
            .collect();
        schedule.sort_by(|a, b| (a.day, &a.start_time).cmp(&(b.day, &b.start_time)));

        Ok(schedule)
    }

    pub async fn create_lesson_impl(&self, req: LessonRequest, day: Day) -> Result<Lesson> {
        let mut active = <LessonActiveModel as sea_orm::ActiveModelTrait>::default();
        apply_request(&mut active, &req, day);

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("创建课程失败: {e}")))?;
        Ok(model.into_lesson())
    }

    pub async fn update_lesson_impl(
        &self,
        id: i64,
        req: LessonRequest,
        day: Day,
    ) -> Result<Option<Lesson>> {
        let Some(existing) = Lessons::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: LessonActiveModel = existing.into();
        apply_request(&mut active, &req, day);
        let model = active
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新课程失败: {e}")))?;
        Ok(Some(model.into_lesson()))
    }

    pub async fn delete_lesson_impl(&self, id: i64) -> Result<bool> {
        let result = Lessons::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除课程失败: {e}")))?;
        Ok(result.rows_affected > 0)
    }
}
