//! 列表行关联名称的批量查询

use std::collections::{BTreeSet, HashMap};

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use crate::entity::prelude::*;
use crate::entity::{classes, grades, lessons, students, subjects, teachers};
use crate::errors::{Result, SchoolError};
use crate::models::users::entities::display_name;

/// 去重后的外键集合
pub(super) fn id_set(ids: impl IntoIterator<Item = i64>) -> Vec<i64> {
    ids.into_iter().collect::<BTreeSet<_>>().into_iter().collect()
}

pub(super) async fn class_names<C: ConnectionTrait>(
    db: &C,
    ids: impl IntoIterator<Item = i64>,
) -> Result<HashMap<i64, String>> {
    let ids = id_set(ids);
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = Classes::find()
        .filter(classes::Column::Id.is_in(ids))
        .all(db)
        .await
        .map_err(|e| SchoolError::database_operation(format!("查询班级名称失败: {e}")))?;
    Ok(rows.into_iter().map(|c| (c.id, c.name)).collect())
}

pub(super) async fn grade_levels<C: ConnectionTrait>(
    db: &C,
    ids: impl IntoIterator<Item = i64>,
) -> Result<HashMap<i64, i32>> {
    let ids = id_set(ids);
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = Grades::find()
        .filter(grades::Column::Id.is_in(ids))
        .all(db)
        .await
        .map_err(|e| SchoolError::database_operation(format!("查询年级失败: {e}")))?;
    Ok(rows.into_iter().map(|g| (g.id, g.level)).collect())
}

pub(super) async fn subject_names<C: ConnectionTrait>(
    db: &C,
    ids: impl IntoIterator<Item = i64>,
) -> Result<HashMap<i64, String>> {
    let ids = id_set(ids);
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = Subjects::find()
        .filter(subjects::Column::Id.is_in(ids))
        .all(db)
        .await
        .map_err(|e| SchoolError::database_operation(format!("查询科目名称失败: {e}")))?;
    Ok(rows.into_iter().map(|s| (s.id, s.name)).collect())
}

pub(super) async fn teacher_names<C: ConnectionTrait>(
    db: &C,
    ids: impl IntoIterator<Item = i64>,
) -> Result<HashMap<i64, String>> {
    let ids = id_set(ids);
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = Teachers::find()
        .filter(teachers::Column::Id.is_in(ids))
        .all(db)
        .await
        .map_err(|e| SchoolError::database_operation(format!("查询教师名称失败: {e}")))?;
    Ok(rows
        .into_iter()
        .map(|t| (t.id, display_name(&t.first_name, t.last_name.as_deref())))
        .collect())
}

pub(super) async fn student_names<C: ConnectionTrait>(
    db: &C,
    ids: impl IntoIterator<Item = i64>,
) -> Result<HashMap<i64, String>> {
    let ids = id_set(ids);
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = Students::find()
        .filter(students::Column::Id.is_in(ids))
        .all(db)
        .await
        .map_err(|e| SchoolError::database_operation(format!("查询学生名称失败: {e}")))?;
    Ok(rows.into_iter().map(|s| (s.id, s.display_name())).collect())
}

pub(super) async fn lessons_by_id<C: ConnectionTrait>(
    db: &C,
    ids: impl IntoIterator<Item = i64>,
) -> Result<HashMap<i64, lessons::Model>> {
    let ids = id_set(ids);
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = Lessons::find()
        .filter(lessons::Column::Id.is_in(ids))
        .all(db)
        .await
        .map_err(|e| SchoolError::database_operation(format!("查询课程失败: {e}")))?;
    Ok(rows.into_iter().map(|l| (l.id, l)).collect())
}

/// 课程所属科目、班级、教师的名称
pub(super) struct LessonNames {
    pub subjects: HashMap<i64, String>,
    pub classes: HashMap<i64, String>,
    pub teachers: HashMap<i64, String>,
}

impl LessonNames {
    pub(super) async fn load<'a, C: ConnectionTrait>(
        db: &C,
        lessons: impl IntoIterator<Item = &'a lessons::Model> + Clone,
    ) -> Result<Self> {
        Ok(Self {
            subjects: subject_names(db, lessons.clone().into_iter().map(|l| l.subject_id)).await?,
            classes: class_names(db, lessons.clone().into_iter().map(|l| l.class_id)).await?,
            teachers: teacher_names(db, lessons.into_iter().map(|l| l.teacher_id)).await?,
        })
    }

    pub(super) fn subject(&self, lesson: Option<&lessons::Model>) -> Option<String> {
        lesson.and_then(|l| self.subjects.get(&l.subject_id).cloned())
    }

    pub(super) fn class(&self, lesson: Option<&lessons::Model>) -> Option<String> {
        lesson.and_then(|l| self.classes.get(&l.class_id).cloned())
    }

    pub(super) fn teacher(&self, lesson: Option<&lessons::Model>) -> Option<String> {
        lesson.and_then(|l| self.teachers.get(&l.teacher_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_set_dedups_and_sorts() {
        assert_eq!(id_set([3, 1, 3, 2]), vec![1, 2, 3]);
        assert!(id_set(Vec::new()).is_empty());
    }
}
