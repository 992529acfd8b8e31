//! 表单选项与记录可见性检查

use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder,
    Select,
};

use super::announcements::announcement_condition;
use super::assignments::assignment_condition;
use super::attendance::attendance_condition;
use super::classes::class_condition;
use super::events::event_condition;
use super::exams::exam_condition;
use super::lessons::lesson_condition;
use super::results::result_condition;
use super::students::student_condition;
use super::SeaOrmStorage;
use super::scope::flat_condition;
use crate::entity::prelude::*;
use crate::entity::{
    announcements, assignments, attendances, classes, events, exams, grades, lessons, parents,
    results, students, subjects, teachers,
};
use crate::errors::{Result, SchoolError};
use crate::models::users::entities::{NamedRef, display_name};
use crate::policy::{Predicate, Resource};

impl SeaOrmStorage {
    pub async fn list_options_impl(
        &self,
        resource: Resource,
        predicate: &Predicate,
    ) -> Result<Vec<NamedRef>> {
        let options = match resource {
            Resource::Teachers => Teachers::find()
                .filter(flat_condition(predicate))
                .order_by_asc(teachers::Column::Id)
                .all(&self.db)
                .await?
                .into_iter()
                .map(|m| NamedRef {
                    id: m.id,
                    name: display_name(&m.first_name, m.last_name.as_deref()),
                })
                .collect(),
            Resource::Students => Students::find()
                .filter(student_condition(predicate))
                .order_by_asc(students::Column::Id)
                .all(&self.db)
                .await?
                .into_iter()
                .map(|m| NamedRef {
                    id: m.id,
                    name: m.display_name(),
                })
                .collect(),
            Resource::Parents => Parents::find()
                .filter(flat_condition(predicate))
                .order_by_asc(parents::Column::Id)
                .all(&self.db)
                .await?
                .into_iter()
                .map(|m| NamedRef {
                    id: m.id,
                    name: display_name(&m.first_name, Some(&m.last_name)),
                })
                .collect(),
            Resource::Grades => Grades::find()
                .filter(flat_condition(predicate))
                .order_by_asc(grades::Column::Level)
                .all(&self.db)
                .await?
                .into_iter()
                .map(|m| NamedRef {
                    id: m.id,
                    name: m.level.to_string(),
                })
                .collect(),
            Resource::Classes => Classes::find()
                .filter(class_condition(predicate))
                .order_by_asc(classes::Column::Name)
                .all(&self.db)
                .await?
                .into_iter()
                .map(|m| NamedRef {
                    id: m.id,
                    name: m.name,
                })
                .collect(),
            Resource::Subjects => Subjects::find()
                .filter(flat_condition(predicate))
                .order_by_asc(subjects::Column::Name)
                .all(&self.db)
                .await?
                .into_iter()
                .map(|m| NamedRef {
                    id: m.id,
                    name: m.name,
                })
                .collect(),
            Resource::Lessons => Lessons::find()
                .filter(lesson_condition(predicate))
                .order_by_asc(lessons::Column::Id)
                .all(&self.db)
                .await?
                .into_iter()
                .map(|m| NamedRef {
                    id: m.id,
                    name: m.name,
                })
                .collect(),
            Resource::Exams => Exams::find()
                .filter(exam_condition(predicate))
                .order_by_asc(exams::Column::Id)
                .all(&self.db)
                .await?
                .into_iter()
                .map(|m| NamedRef {
                    id: m.id,
                    name: m.title,
                })
                .collect(),
            Resource::Assignments => Assignments::find()
                .filter(assignment_condition(predicate))
                .order_by_asc(assignments::Column::Id)
                .all(&self.db)
                .await?
                .into_iter()
                .map(|m| NamedRef {
                    id: m.id,
                    name: m.title,
                })
                .collect(),
            // 成绩、考勤、活动、公告不作为下拉选项
            Resource::Results
            | Resource::Attendance
            | Resource::Events
            | Resource::Announcements => Vec::new(),
        };
        Ok(options)
    }

    pub async fn is_visible_impl(
        &self,
        resource: Resource,
        predicate: &Predicate,
        id: i64,
    ) -> Result<bool> {
        match resource {
            Resource::Announcements => {
                self.exists(
                    Announcements::find()
                        .filter(announcement_condition(predicate))
                        .filter(announcements::Column::Id.eq(id)),
                )
                .await
            }
            Resource::Assignments => {
                self.exists(
                    Assignments::find()
                        .filter(assignment_condition(predicate))
                        .filter(assignments::Column::Id.eq(id)),
                )
                .await
            }
            Resource::Attendance => {
                self.exists(
                    Attendances::find()
                        .filter(attendance_condition(predicate))
                        .filter(attendances::Column::Id.eq(id)),
                )
                .await
            }
            Resource::Classes => {
                self.exists(
                    Classes::find()
                        .filter(class_condition(predicate))
                        .filter(classes::Column::Id.eq(id)),
                )
                .await
            }
            Resource::Events => {
                self.exists(
                    Events::find()
                        .filter(event_condition(predicate))
                        .filter(events::Column::Id.eq(id)),
                )
                .await
            }
            Resource::Exams => {
                self.exists(
                    Exams::find()
                        .filter(exam_condition(predicate))
                        .filter(exams::Column::Id.eq(id)),
                )
                .await
            }
            Resource::Grades => {
                self.exists(
                    Grades::find()
                        .filter(flat_condition(predicate))
                        .filter(grades::Column::Id.eq(id)),
                )
                .await
            }
            Resource::Lessons => {
                self.exists(
                    Lessons::find()
                        .filter(lesson_condition(predicate))
                        .filter(lessons::Column::Id.eq(id)),
                )
                .await
            }
            Resource::Parents => {
                self.exists(
                    Parents::find()
                        .filter(flat_condition(predicate))
                        .filter(parents::Column::Id.eq(id)),
                )
                .await
            }
            Resource::Results => {
                self.exists(
                    Results::find()
                        .filter(result_condition(predicate))
                        .filter(results::Column::Id.eq(id)),
                )
                .await
            }
            Resource::Students => {
                self.exists(
                    Students::find()
                        .filter(student_condition(predicate))
                        .filter(students::Column::Id.eq(id)),
                )
                .await
            }
            Resource::Subjects => {
                self.exists(
                    Subjects::find()
                        .filter(flat_condition(predicate))
                        .filter(subjects::Column::Id.eq(id)),
                )
                .await
            }
            Resource::Teachers => {
                self.exists(
                    Teachers::find()
                        .filter(flat_condition(predicate))
                        .filter(teachers::Column::Id.eq(id)),
                )
                .await
            }
        }
    }

    async fn exists<E>(&self, select: Select<E>) -> Result<bool>
    where
        E: EntityTrait,
        E::Model: FromQueryResult + Sized + Send + Sync,
    {
        let count = select
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("检查记录可见性失败: {e}")))?;
        Ok(count > 0)
    }
}
