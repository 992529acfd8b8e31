//! 页面访问表：路径前缀 → 允许的角色

use super::Resource;
use crate::models::users::entities::Role;

const ADMIN: &[Role] = &[Role::Admin];
const ADMIN_TEACHER: &[Role] = &[Role::Admin, Role::Teacher];
const ALL: &[Role] = &[Role::Admin, Role::Teacher, Role::Student, Role::Parent];

/// 认证之后按前缀检查，越具体的前缀排在越前面
static ROUTE_ACCESS: &[(&str, &[Role])] = &[
    ("/admin", ADMIN),
    ("/teacher", &[Role::Teacher]),
    ("/student", &[Role::Student]),
    ("/parent", &[Role::Parent]),
    ("/list/teachers", ADMIN_TEACHER),
    ("/list/students", ADMIN_TEACHER),
    ("/list/parents", ADMIN_TEACHER),
    ("/list/classes", ADMIN_TEACHER),
    ("/list/subjects", ADMIN),
    ("/list/grades", ADMIN),
    ("/list/exams", ALL),
    ("/list/assignments", ALL),
    ("/list/results", ALL),
    ("/list/attendance", ALL),
    ("/list/events", ALL),
    ("/list/announcements", ALL),
    ("/list/lessons", ALL),
];

/// 路径允许的角色，未登记的路径不对任何角色开放
pub fn allowed_roles(path: &str) -> &'static [Role] {
    ROUTE_ACCESS
        .iter()
        .find(|(prefix, _)| {
            path.strip_prefix(prefix)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        })
        .map(|(_, roles)| *roles)
        .unwrap_or(&[])
}

/// 可以增删改该资源的角色
pub fn mutating_roles(resource: Resource) -> &'static [Role] {
    match resource {
        Resource::Exams | Resource::Assignments | Resource::Attendance => ADMIN_TEACHER,
        _ => ADMIN,
    }
}

pub fn may_mutate(resource: Resource, role: Role) -> bool {
    mutating_roles(resource).contains(&role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboards_are_single_role() {
        assert_eq!(allowed_roles("/admin"), &[Role::Admin]);
        assert_eq!(allowed_roles("/teacher"), &[Role::Teacher]);
        assert_eq!(allowed_roles("/student"), &[Role::Student]);
        assert_eq!(allowed_roles("/parent"), &[Role::Parent]);
    }

    #[test]
    fn test_list_prefixes() {
        assert_eq!(allowed_roles("/list/teachers/12"), ADMIN_TEACHER);
        assert_eq!(allowed_roles("/list/subjects"), ADMIN);
        assert_eq!(allowed_roles("/list/results"), ALL);
        // 前缀必须在路径分隔处结束
        assert!(allowed_roles("/list/teachersx").is_empty());
        assert!(allowed_roles("/unknown").is_empty());
    }

    #[test]
    fn test_teachers_mutate_only_lesson_records() {
        for resource in [Resource::Exams, Resource::Assignments, Resource::Attendance] {
            assert!(may_mutate(resource, Role::Teacher));
        }
        for resource in [Resource::Results, Resource::Lessons, Resource::Students] {
            assert!(!may_mutate(resource, Role::Teacher));
            assert!(may_mutate(resource, Role::Admin));
        }
        assert!(!may_mutate(Resource::Exams, Role::Student));
    }
}
