use serde::Serialize;

pub use crate::models::users::entities::Role;

/// 当前请求的调用者，由认证中间件写入请求扩展
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Viewer {
    pub id: i64,
    pub role: Role,
}

impl Viewer {
    pub fn new(id: i64, role: Role) -> Self {
        Self { id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// 列表资源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Announcements,
    Assignments,
    Attendance,
    Classes,
    Events,
    Exams,
    Grades,
    Lessons,
    Parents,
    Results,
    Students,
    Subjects,
    Teachers,
}

/// 记录可见范围
///
/// 各变体只描述关系，由存储层针对具体资源编译成查询条件：
/// - `TaughtBy(t)`：记录所属课程由 t 任教
/// - `ClassTaughtBy(t)`：记录所属班级中有 t 任教的课程
/// - `SupervisedOrTaughtBy(t)`：班级由 t 担任班主任，或班级中有 t 任教的课程
/// - `ClassEnrolls(s)`：记录所属班级包含学生 s
/// - `ClassEnrollsChildOf(p)`：记录所属班级包含家长 p 的孩子
/// - `OwnStudent(s)`：记录直接引用学生 s
/// - `ChildOf(p)`：记录引用的学生属于家长 p
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Everything,
    Nothing,
    TaughtBy(i64),
    ClassTaughtBy(i64),
    SupervisedOrTaughtBy(i64),
    ClassEnrolls(i64),
    ClassEnrollsChildOf(i64),
    OwnStudent(i64),
    ChildOf(i64),
}

/// 角色谓词；`include_global` 为真时无班级的记录对所有人可见
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Predicate {
    pub visibility: Visibility,
    pub include_global: bool,
}

impl Predicate {
    pub fn everything() -> Self {
        Self {
            visibility: Visibility::Everything,
            include_global: false,
        }
    }

    pub fn nothing() -> Self {
        Self {
            visibility: Visibility::Nothing,
            include_global: false,
        }
    }
}

type Rule = (Resource, Role, fn(i64) -> Visibility);

fn everything(_: i64) -> Visibility {
    Visibility::Everything
}

static RULES: &[Rule] = &[
    (Resource::Announcements, Role::Admin, everything),
    (Resource::Announcements, Role::Teacher, Visibility::ClassTaughtBy),
    (Resource::Announcements, Role::Student, Visibility::ClassEnrolls),
    (Resource::Announcements, Role::Parent, Visibility::ClassEnrollsChildOf),
    (Resource::Assignments, Role::Admin, everything),
    (Resource::Assignments, Role::Teacher, Visibility::TaughtBy),
    (Resource::Assignments, Role::Student, Visibility::ClassEnrolls),
    (Resource::Assignments, Role::Parent, Visibility::ClassEnrollsChildOf),
    (Resource::Attendance, Role::Admin, everything),
    (Resource::Attendance, Role::Teacher, Visibility::TaughtBy),
    (Resource::Attendance, Role::Student, Visibility::OwnStudent),
    (Resource::Attendance, Role::Parent, Visibility::ChildOf),
    (Resource::Classes, Role::Admin, everything),
    (Resource::Classes, Role::Teacher, Visibility::SupervisedOrTaughtBy),
    (Resource::Events, Role::Admin, everything),
    (Resource::Events, Role::Teacher, Visibility::ClassTaughtBy),
    (Resource::Events, Role::Student, Visibility::ClassEnrolls),
    (Resource::Events, Role::Parent, Visibility::ClassEnrollsChildOf),
    (Resource::Exams, Role::Admin, everything),
    (Resource::Exams, Role::Teacher, Visibility::TaughtBy),
    (Resource::Exams, Role::Student, Visibility::ClassEnrolls),
    (Resource::Exams, Role::Parent, Visibility::ClassEnrollsChildOf),
    (Resource::Grades, Role::Admin, everything),
    (Resource::Lessons, Role::Admin, everything),
    (Resource::Lessons, Role::Teacher, Visibility::TaughtBy),
    (Resource::Lessons, Role::Student, Visibility::ClassEnrolls),
    (Resource::Lessons, Role::Parent, Visibility::ClassEnrollsChildOf),
    (Resource::Parents, Role::Admin, everything),
    (Resource::Parents, Role::Teacher, everything),
    (Resource::Results, Role::Admin, everything),
    (Resource::Results, Role::Teacher, Visibility::TaughtBy),
    (Resource::Results, Role::Student, Visibility::OwnStudent),
    (Resource::Results, Role::Parent, Visibility::ChildOf),
    (Resource::Students, Role::Admin, everything),
    (Resource::Students, Role::Teacher, Visibility::ClassTaughtBy),
    (Resource::Subjects, Role::Admin, everything),
    (Resource::Teachers, Role::Admin, everything),
    (Resource::Teachers, Role::Teacher, everything),
];

/// 无班级即全校可见的资源
fn has_global_scope(resource: Resource) -> bool {
    matches!(resource, Resource::Announcements | Resource::Events)
}

/// 查表得到调用者对某资源的谓词，表中没有的组合不可见
pub fn predicate_for(resource: Resource, viewer: &Viewer) -> Predicate {
    let visibility = RULES
        .iter()
        .find(|(r, role, _)| *r == resource && *role == viewer.role)
        .map(|(_, _, build)| build(viewer.id))
        .unwrap_or(Visibility::Nothing);

    Predicate {
        visibility,
        include_global: has_global_scope(resource) && visibility != Visibility::Everything,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_RESOURCES: [Resource; 13] = [
        Resource::Announcements,
        Resource::Assignments,
        Resource::Attendance,
        Resource::Classes,
        Resource::Events,
        Resource::Exams,
        Resource::Grades,
        Resource::Lessons,
        Resource::Parents,
        Resource::Results,
        Resource::Students,
        Resource::Subjects,
        Resource::Teachers,
    ];

    fn vis(resource: Resource, role: Role) -> Visibility {
        predicate_for(resource, &Viewer::new(42, role)).visibility
    }

    #[test]
    fn test_admin_sees_everything() {
        for resource in ALL_RESOURCES {
            let predicate = predicate_for(resource, &Viewer::new(1, Role::Admin));
            assert_eq!(predicate, Predicate::everything(), "{resource:?}");
        }
    }

    #[test]
    fn test_full_table() {
        use Resource::*;
        use Visibility::*;

        let expected: [(Resource, [Visibility; 3]); 13] = [
            (Announcements, [ClassTaughtBy(42), ClassEnrolls(42), ClassEnrollsChildOf(42)]),
            (Assignments, [TaughtBy(42), ClassEnrolls(42), ClassEnrollsChildOf(42)]),
            (Attendance, [TaughtBy(42), OwnStudent(42), ChildOf(42)]),
            (Classes, [SupervisedOrTaughtBy(42), Nothing, Nothing]),
            (Events, [ClassTaughtBy(42), ClassEnrolls(42), ClassEnrollsChildOf(42)]),
            (Exams, [TaughtBy(42), ClassEnrolls(42), ClassEnrollsChildOf(42)]),
            (Grades, [Nothing, Nothing, Nothing]),
            (Lessons, [TaughtBy(42), ClassEnrolls(42), ClassEnrollsChildOf(42)]),
            (Parents, [Everything, Nothing, Nothing]),
            (Results, [TaughtBy(42), OwnStudent(42), ChildOf(42)]),
            (Students, [ClassTaughtBy(42), Nothing, Nothing]),
            (Subjects, [Nothing, Nothing, Nothing]),
            (Teachers, [Everything, Nothing, Nothing]),
        ];

        for (resource, [teacher, student, parent]) in expected {
            assert_eq!(vis(resource, Role::Teacher), teacher, "{resource:?} teacher");
            assert_eq!(vis(resource, Role::Student), student, "{resource:?} student");
            assert_eq!(vis(resource, Role::Parent), parent, "{resource:?} parent");
        }
    }

    #[test]
    fn test_global_scope_only_for_class_optional_resources() {
        for resource in ALL_RESOURCES {
            for role in [Role::Teacher, Role::Student, Role::Parent] {
                let predicate = predicate_for(resource, &Viewer::new(3, role));
                assert_eq!(
                    predicate.include_global,
                    matches!(resource, Resource::Announcements | Resource::Events),
                    "{resource:?} {role:?}"
                );
            }
        }
    }

    #[test]
    fn test_rules_have_no_duplicates() {
        for (i, (resource, role, _)) in RULES.iter().enumerate() {
            assert!(
                !RULES[i + 1..]
                    .iter()
                    .any(|(r, ro, _)| r == resource && ro == role),
                "duplicate rule for {resource:?} {role:?}"
            );
        }
    }
}
