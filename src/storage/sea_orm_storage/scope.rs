//! 角色谓词与搜索条件的编译

use sea_orm::sea_query::{Expr, ExprTrait, Func, LikeExpr, SelectStatement};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, FromQueryResult, PaginatorTrait,
    QueryFilter, QuerySelect, QueryTrait, Select,
};

use super::SeaOrmStorage;
use crate::entity::{assignments, classes, exams, lessons, students, subjects, teachers};
use crate::errors::{Result, SchoolError};
use crate::models::{PageRequest, PaginationInfo};
use crate::policy::{Predicate, Visibility};
use crate::utils::sql::contains_pattern;

/// 恒假条件
pub(super) fn nothing() -> Condition {
    Condition::all().add(Expr::cust("1 = 0"))
}

/// 将谓词编译为查询条件
///
/// `rule` 负责该资源能表达的可见范围，返回 None 视为不可见；
/// `global` 为无班级记录的条件，仅在谓词要求时并入。
pub(super) fn scope_condition(
    predicate: &Predicate,
    rule: impl FnOnce(Visibility) -> Option<Condition>,
    global: Option<Condition>,
) -> Condition {
    let base = match predicate.visibility {
        Visibility::Everything => return Condition::all(),
        Visibility::Nothing => None,
        visibility => rule(visibility),
    }
    .unwrap_or_else(nothing);

    match (predicate.include_global, global) {
        (true, Some(global)) => Condition::any().add(base).add(global),
        _ => base,
    }
}

/// 只区分全部可见与不可见的资源
pub(super) fn flat_condition(predicate: &Predicate) -> Condition {
    scope_condition(predicate, |_| None, None)
}

/// t 任教的课程
pub(super) fn lessons_taught_by(teacher_id: i64) -> SelectStatement {
    lessons::Entity::find()
        .select_only()
        .column(lessons::Column::Id)
        .filter(lessons::Column::TeacherId.eq(teacher_id))
        .into_query()
}

/// t 有课的班级
pub(super) fn classes_taught_by(teacher_id: i64) -> SelectStatement {
    lessons::Entity::find()
        .select_only()
        .column(lessons::Column::ClassId)
        .filter(lessons::Column::TeacherId.eq(teacher_id))
        .into_query()
}

fn class_of_student(student_id: i64) -> SelectStatement {
    students::Entity::find()
        .select_only()
        .column(students::Column::ClassId)
        .filter(students::Column::Id.eq(student_id))
        .into_query()
}

fn classes_of_children(parent_id: i64) -> SelectStatement {
    students::Entity::find()
        .select_only()
        .column(students::Column::ClassId)
        .filter(students::Column::ParentId.eq(parent_id))
        .into_query()
}

pub(super) fn children_of(parent_id: i64) -> SelectStatement {
    students::Entity::find()
        .select_only()
        .column(students::Column::Id)
        .filter(students::Column::ParentId.eq(parent_id))
        .into_query()
}

fn lessons_in_classes(classes: SelectStatement) -> SelectStatement {
    lessons::Entity::find()
        .select_only()
        .column(lessons::Column::Id)
        .filter(lessons::Column::ClassId.in_subquery(classes))
        .into_query()
}

pub(super) fn exams_in_lessons(lessons: SelectStatement) -> SelectStatement {
    exams::Entity::find()
        .select_only()
        .column(exams::Column::Id)
        .filter(exams::Column::LessonId.in_subquery(lessons))
        .into_query()
}

pub(super) fn assignments_in_lessons(lessons: SelectStatement) -> SelectStatement {
    assignments::Entity::find()
        .select_only()
        .column(assignments::Column::Id)
        .filter(assignments::Column::LessonId.in_subquery(lessons))
        .into_query()
}

/// 记录通过班级列关联时的可见范围
pub(super) fn class_scope<C: ColumnTrait>(column: C, visibility: Visibility) -> Option<Condition> {
    let expr = match visibility {
        Visibility::ClassTaughtBy(t) => column.in_subquery(classes_taught_by(t)),
        Visibility::ClassEnrolls(s) => column.in_subquery(class_of_student(s)),
        Visibility::ClassEnrollsChildOf(p) => column.in_subquery(classes_of_children(p)),
        _ => return None,
    };
    Some(Condition::all().add(expr))
}

/// 记录通过课程列关联时的可见范围
pub(super) fn lesson_scope<C: ColumnTrait>(
    column: C,
    visibility: Visibility,
) -> Option<Condition> {
    let expr = match visibility {
        Visibility::TaughtBy(t) => column.in_subquery(lessons_taught_by(t)),
        Visibility::ClassEnrolls(s) => column.in_subquery(lessons_in_classes(class_of_student(s))),
        Visibility::ClassEnrollsChildOf(p) => {
            column.in_subquery(lessons_in_classes(classes_of_children(p)))
        }
        _ => return None,
    };
    Some(Condition::all().add(expr))
}

/// 记录通过学生列关联时的可见范围
pub(super) fn student_scope<C: ColumnTrait>(
    column: C,
    visibility: Visibility,
) -> Option<Condition> {
    let expr = match visibility {
        Visibility::OwnStudent(s) => column.eq(s),
        Visibility::ChildOf(p) => column.in_subquery(children_of(p)),
        _ => return None,
    };
    Some(Condition::all().add(expr))
}

fn lowered<C: ColumnTrait>(column: C) -> Expr {
    Expr::expr(Func::lower(Expr::col((column.entity_name(), column))))
}

/// 不区分大小写的包含匹配
pub(super) fn contains_ci<C: ColumnTrait>(column: C, needle: &str) -> Condition {
    let pattern = LikeExpr::new(contains_pattern(needle)).escape('\\');
    Condition::all().add(lowered(column).like(pattern))
}

/// 多列任一匹配
pub(super) fn any_contains<C: ColumnTrait>(columns: &[C], needle: &str) -> Condition {
    columns.iter().fold(Condition::any(), |cond, column| {
        cond.add(contains_ci(*column, needle))
    })
}

/// 不区分大小写的完全匹配（仅 ASCII）
pub(super) fn equals_ci<C: ColumnTrait>(column: C, value: &str) -> Condition {
    Condition::all().add(lowered(column).eq(value.to_ascii_lowercase()))
}

/// 科目名称包含 needle 的科目
pub(super) fn subjects_matching(needle: &str) -> SelectStatement {
    subjects::Entity::find()
        .select_only()
        .column(subjects::Column::Id)
        .filter(contains_ci(subjects::Column::Name, needle))
        .into_query()
}

/// 名或姓包含 needle 的教师
pub(super) fn teachers_matching(needle: &str) -> SelectStatement {
    teachers::Entity::find()
        .select_only()
        .column(teachers::Column::Id)
        .filter(any_contains(
            &[teachers::Column::FirstName, teachers::Column::LastName],
            needle,
        ))
        .into_query()
}

/// 名或姓包含 needle 的学生
pub(super) fn students_matching(needle: &str) -> SelectStatement {
    students::Entity::find()
        .select_only()
        .column(students::Column::Id)
        .filter(any_contains(
            &[students::Column::FirstName, students::Column::LastName],
            needle,
        ))
        .into_query()
}

/// 名称与 name 完全相同（不区分大小写）的班级
pub(super) fn classes_named(name: &str) -> SelectStatement {
    classes::Entity::find()
        .select_only()
        .column(classes::Column::Id)
        .filter(equals_ci(classes::Column::Name, name))
        .into_query()
}

/// 满足条件的课程
pub(super) fn lessons_where(condition: Condition) -> SelectStatement {
    lessons::Entity::find()
        .select_only()
        .column(lessons::Column::Id)
        .filter(condition)
        .into_query()
}

impl SeaOrmStorage {
    /// 分页查询，返回当前页模型与分页信息
    pub(super) async fn fetch_page<E>(
        &self,
        select: Select<E>,
        page: PageRequest,
        what: &str,
    ) -> Result<(Vec<E::Model>, PaginationInfo)>
    where
        E: EntityTrait,
        E::Model: FromQueryResult + Sized + Send + Sync + 'static,
    {
        let paginator = select.paginate(&self.db, page.page_size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询{what}总数失败: {e}")))?;
        let models = paginator
            .fetch_page(page.page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询{what}列表失败: {e}")))?;

        Ok((models, PaginationInfo::new(page.page, page.page_size, total)))
    }
}
