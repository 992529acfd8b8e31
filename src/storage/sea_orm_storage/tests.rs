use chrono::{Duration, NaiveDate, Utc};
use sea_orm::{ConnectOptions, Database};

use super::SeaOrmStorage;
use crate::errors::SchoolError;
use crate::models::PageRequest;
use crate::models::announcements::requests::AnnouncementRequest;
use crate::models::assignments::requests::AssignmentRequest;
use crate::models::attendance::requests::AttendanceRequest;
use crate::models::classes::requests::ClassRequest;
use crate::models::events::requests::EventRequest;
use crate::models::exams::requests::ExamRequest;
use crate::models::grades::requests::GradeRequest;
use crate::models::lessons::entities::Day;
use crate::models::lessons::requests::LessonRequest;
use crate::models::parents::requests::ParentInput;
use crate::models::results::entities::ResultSource;
use crate::models::results::requests::ResultInput;
use crate::models::students::requests::StudentInput;
use crate::models::subjects::requests::SubjectRequest;
use crate::models::teachers::requests::TeacherInput;
use crate::models::users::entities::{Gender, Role};
use crate::policy::{ListFilter, Predicate, Resource, Viewer, predicate_for};
use crate::storage::Storage;

async fn storage() -> SeaOrmStorage {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.unwrap();
    SeaOrmStorage::with_connection(db).await.unwrap()
}

fn birthday() -> NaiveDate {
    NaiveDate::from_ymd_opt(1990, 5, 17).unwrap()
}

fn teacher_input(username: &str, first_name: &str) -> TeacherInput {
    TeacherInput {
        username: username.into(),
        password: None,
        email: None,
        first_name: first_name.into(),
        last_name: Some("Teacher".into()),
        phone: None,
        address: None,
        blood_group: None,
        birthday: birthday(),
        gender: Gender::Female,
        img: None,
        subjects: Vec::new(),
    }
}

fn student_input(username: &str, class_id: i64, grade_id: i64, parent_id: i64) -> StudentInput {
    StudentInput {
        username: username.into(),
        password: None,
        email: None,
        first_name: username.into(),
        last_name: None,
        phone: None,
        address: None,
        blood_group: None,
        birthday: birthday(),
        gender: Gender::Male,
        img: None,
        grade_id,
        class_id,
        parent_id,
    }
}

fn lesson_request(name: &str, subject_id: i64, class_id: i64, teacher_id: i64) -> LessonRequest {
    LessonRequest {
        name: name.into(),
        day: Some(Day::Monday),
        start_time: "08:00".into(),
        end_time: "09:00".into(),
        subject_id,
        class_id,
        teacher_id,
    }
}

/// 两个班级：A 班由 teacher_a 任教 Math，B 班由 teacher_b 任教 History
struct School {
    storage: SeaOrmStorage,
    grade: i64,
    class_a: i64,
    class_b: i64,
    teacher_a: i64,
    teacher_b: i64,
    parent: i64,
    student: i64,
    lesson_a: i64,
    lesson_b: i64,
}

async fn school() -> School {
    let storage = storage().await;
    let grade = storage
        .create_grade(GradeRequest { level: 1 })
        .await
        .unwrap()
        .id;
    let teacher_a = storage
        .create_teacher(teacher_input("alice", "Alice"), "hash".into())
        .await
        .unwrap()
        .id;
    let teacher_b = storage
        .create_teacher(teacher_input("bob", "Bob"), "hash".into())
        .await
        .unwrap()
        .id;
    let class_a = storage
        .create_class(ClassRequest {
            name: "1A".into(),
            capacity: 20,
            grade_id: grade,
            supervisor_id: teacher_a,
        })
        .await
        .unwrap()
        .id;
    let class_b = storage
        .create_class(ClassRequest {
            name: "1B".into(),
            capacity: 20,
            grade_id: grade,
            supervisor_id: teacher_b,
        })
        .await
        .unwrap()
        .id;
    let math = storage
        .create_subject(SubjectRequest {
            name: "Math".into(),
            teacher_ids: vec![teacher_a],
        })
        .await
        .unwrap()
        .id;
    let history = storage
        .create_subject(SubjectRequest {
            name: "History".into(),
            teacher_ids: vec![teacher_b],
        })
        .await
        .unwrap()
        .id;
    let lesson_a = storage
        .create_lesson(lesson_request("Algebra", math, class_a, teacher_a), Day::Monday)
        .await
        .unwrap()
        .id;
    let lesson_b = storage
        .create_lesson(lesson_request("Rome", history, class_b, teacher_b), Day::Monday)
        .await
        .unwrap()
        .id;
    let parent = storage
        .create_parent(
            ParentInput {
                username: "parent1".into(),
                password: None,
                email: None,
                first_name: "Pat".into(),
                last_name: "Parent".into(),
                phone: "123456".into(),
                address: None,
                img: None,
            },
            "hash".into(),
        )
        .await
        .unwrap()
        .id;
    let student = storage
        .create_student(student_input("stu1", class_a, grade, parent), "hash".into())
        .await
        .unwrap()
        .id;

    School {
        storage,
        grade,
        class_a,
        class_b,
        teacher_a,
        teacher_b,
        parent,
        student,
        lesson_a,
        lesson_b,
    }
}

fn page() -> PageRequest {
    PageRequest::new(1, 10)
}

#[tokio::test]
async fn test_lessons_follow_role_visibility() {
    let s = school().await;
    let cases = [
        (Viewer::new(1, Role::Admin), vec![s.lesson_a, s.lesson_b]),
        (Viewer::new(s.teacher_a, Role::Teacher), vec![s.lesson_a]),
        (Viewer::new(s.teacher_b, Role::Teacher), vec![s.lesson_b]),
        (Viewer::new(s.student, Role::Student), vec![s.lesson_a]),
        (Viewer::new(s.parent, Role::Parent), vec![s.lesson_a]),
    ];

    for (viewer, expected) in cases {
        let predicate = predicate_for(Resource::Lessons, &viewer);
        let list = s
            .storage
            .list_lessons(&predicate, &ListFilter::default(), page())
            .await
            .unwrap();
        let ids: Vec<i64> = list.items.iter().map(|l| l.lesson.id).collect();
        assert_eq!(ids, expected, "{viewer:?}");
        assert_eq!(list.pagination.total, expected.len() as u64);
    }
}

#[tokio::test]
async fn test_teacher_sees_students_of_taught_classes() {
    let s = school().await;
    s.storage
        .create_student(student_input("stu2", s.class_b, s.grade, s.parent), "hash".into())
        .await
        .unwrap();

    let viewer = Viewer::new(s.teacher_a, Role::Teacher);
    let predicate = predicate_for(Resource::Students, &viewer);
    let list = s
        .storage
        .list_students(&predicate, &ListFilter::default(), page())
        .await
        .unwrap();
    assert_eq!(list.items.len(), 1);
    assert_eq!(list.items[0].student.id, s.student);
    assert_eq!(list.items[0].class_name.as_deref(), Some("1A"));

    // 学生角色不能访问学生列表
    let predicate = predicate_for(Resource::Students, &Viewer::new(s.student, Role::Student));
    let list = s
        .storage
        .list_students(&predicate, &ListFilter::default(), page())
        .await
        .unwrap();
    assert!(list.items.is_empty());
}

#[tokio::test]
async fn test_lesson_search_matches_subject_or_teacher_name() {
    let s = school().await;
    let mathilda = s
        .storage
        .create_teacher(teacher_input("mathilda", "Mathilda"), "hash".into())
        .await
        .unwrap()
        .id;
    let history = s
        .storage
        .list_options(Resource::Subjects, &Predicate::everything())
        .await
        .unwrap()
        .into_iter()
        .find(|o| o.name == "History")
        .unwrap()
        .id;
    let lesson_m = s
        .storage
        .create_lesson(
            lesson_request("Wars", history, s.class_b, mathilda),
            Day::Tuesday,
        )
        .await
        .unwrap()
        .id;

    let filter = ListFilter {
        search: Some("MATH".into()),
        ..Default::default()
    };
    let list = s
        .storage
        .list_lessons(&Predicate::everything(), &filter, page())
        .await
        .unwrap();
    let ids: Vec<i64> = list.items.iter().map(|l| l.lesson.id).collect();
    assert_eq!(ids, vec![s.lesson_a, lesson_m]);
}

#[tokio::test]
async fn test_pagination_reports_pages() {
    let s = storage().await;
    for i in 0..25 {
        s.create_announcement(AnnouncementRequest {
            title: format!("Notice {i}"),
            description: String::new(),
            date: Utc::now() + Duration::minutes(i),
            class_id: 0,
        })
        .await
        .unwrap();
    }

    let list = s
        .list_announcements(
            &Predicate::everything(),
            &ListFilter::default(),
            PageRequest::new(3, 10),
        )
        .await
        .unwrap();
    assert_eq!(list.items.len(), 5);
    assert_eq!(list.pagination.total, 25);
    assert_eq!(list.pagination.total_pages, 3);

    // 超大页码被截断，越界页为空
    let list = s
        .list_announcements(
            &Predicate::everything(),
            &ListFilter::default(),
            PageRequest::new(u64::MAX, 10),
        )
        .await
        .unwrap();
    assert!(list.items.is_empty());
    assert_eq!(list.pagination.total, 25);
}

#[tokio::test]
async fn test_full_class_rejects_student_without_writes() {
    let s = school().await;
    let tiny = s
        .storage
        .create_class(ClassRequest {
            name: "Tiny".into(),
            capacity: 1,
            grade_id: s.grade,
            supervisor_id: s.teacher_a,
        })
        .await
        .unwrap()
        .id;
    s.storage
        .create_student(student_input("first", tiny, s.grade, s.parent), "hash".into())
        .await
        .unwrap();
    let before = s.storage.count_credentials().await.unwrap();

    let err = s
        .storage
        .create_student(student_input("second", tiny, s.grade, s.parent), "hash".into())
        .await
        .unwrap_err();
    assert!(matches!(err, SchoolError::BusinessRule(ref m) if m == "Class capacity is full"));
    assert_eq!(s.storage.count_credentials().await.unwrap(), before);
    assert!(
        s.storage
            .get_credential_by_username("second")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_teacher_delete_is_atomic() {
    let s = school().await;
    let free = s
        .storage
        .create_teacher(teacher_input("free", "Free"), "hash".into())
        .await
        .unwrap()
        .id;
    assert!(s.storage.delete_teacher(free).await.unwrap());
    assert!(s.storage.get_credential_by_id(free).await.unwrap().is_none());
    assert!(s.storage.get_teacher_detail(free).await.unwrap().is_none());

    // 仍有课程引用时档案删除失败，凭据随事务回滚
    assert!(s.storage.delete_teacher(s.teacher_a).await.is_err());
    assert!(
        s.storage
            .get_credential_by_id(s.teacher_a)
            .await
            .unwrap()
            .is_some()
    );
    assert!(
        s.storage
            .get_teacher_detail(s.teacher_a)
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn test_teacher_update_replaces_subjects() {
    let s = school().await;
    let subjects = s
        .storage
        .list_options(Resource::Subjects, &Predicate::everything())
        .await
        .unwrap();
    let all: Vec<i64> = subjects.iter().map(|o| o.id).collect();

    let mut input = teacher_input("alice2", "Alice");
    input.subjects = all.clone();
    s.storage.update_teacher(s.teacher_a, input).await.unwrap().unwrap();

    let detail = s.storage.get_teacher_detail(s.teacher_a).await.unwrap().unwrap();
    assert_eq!(detail.subject_count, all.len() as u64);
    assert_eq!(detail.lesson_count, 1);
    assert_eq!(detail.class_count, 1);
    let credential = s.storage.get_credential_by_id(s.teacher_a).await.unwrap().unwrap();
    assert_eq!(credential.username, "alice2");
    assert_eq!(credential.password_hash, "hash");
}

#[tokio::test]
async fn test_orphaned_results_are_dropped_but_counted() {
    let s = school().await;
    let exam = s
        .storage
        .create_exam(ExamRequest {
            title: "Quiz".into(),
            start_time: Utc::now(),
            end_time: Utc::now() + Duration::hours(1),
            lesson_id: s.lesson_a,
        })
        .await
        .unwrap()
        .id;
    s.storage
        .create_result(ResultInput {
            score: 90,
            source: ResultSource::Exam(exam),
            student_id: s.student,
        })
        .await
        .unwrap();

    let list = s
        .storage
        .list_results(&Predicate::everything(), &ListFilter::default(), page())
        .await
        .unwrap();
    assert_eq!(list.items.len(), 1);
    assert_eq!(list.items[0].title, "Quiz");
    assert_eq!(list.items[0].class_name.as_deref(), Some("1A"));

    let viewer = Viewer::new(s.teacher_b, Role::Teacher);
    let hidden = s
        .storage
        .list_results(
            &predicate_for(Resource::Results, &viewer),
            &ListFilter::default(),
            page(),
        )
        .await
        .unwrap();
    assert_eq!(hidden.pagination.total, 0);

    assert!(s.storage.delete_exam(exam).await.unwrap());
    let list = s
        .storage
        .list_results(&Predicate::everything(), &ListFilter::default(), page())
        .await
        .unwrap();
    assert!(list.items.is_empty());
    assert_eq!(list.pagination.total, 1);
}

#[tokio::test]
async fn test_global_events_visible_to_everyone() {
    let s = school().await;
    let now = Utc::now();
    let event = |title: &str, class_id: i64| EventRequest {
        title: title.into(),
        description: String::new(),
        start_date: now,
        end_date: now + Duration::hours(2),
        class_id,
    };
    s.storage.create_event(event("Fair", 0)).await.unwrap();
    s.storage.create_event(event("Trip A", s.class_a)).await.unwrap();
    s.storage.create_event(event("Trip B", s.class_b)).await.unwrap();

    let predicate = predicate_for(Resource::Events, &Viewer::new(s.student, Role::Student));
    let list = s
        .storage
        .list_events(&predicate, &ListFilter::default(), page())
        .await
        .unwrap();
    let mut titles: Vec<&str> = list.items.iter().map(|e| e.event.title.as_str()).collect();
    titles.sort_unstable();
    assert_eq!(titles, ["Fair", "Trip A"]);

    // 班级名称完全匹配
    let filter = ListFilter {
        search: Some("1b".into()),
        ..Default::default()
    };
    let list = s
        .storage
        .list_events(&Predicate::everything(), &filter, page())
        .await
        .unwrap();
    assert_eq!(list.items.len(), 1);
    assert_eq!(list.items[0].class_name.as_deref(), Some("1B"));

    let today = s
        .storage
        .list_events_between(&predicate, now - Duration::hours(1), now + Duration::hours(1))
        .await
        .unwrap();
    assert_eq!(today.len(), 2);
}

#[tokio::test]
async fn test_admin_counts_and_visibility_checks() {
    let s = school().await;
    s.storage.create_admin("admin", "hash").await.unwrap();

    let counts = s.storage.count_users_by_role().await.unwrap();
    assert_eq!(
        (counts.admins, counts.teachers, counts.students, counts.parents),
        (1, 2, 1, 1)
    );

    let teacher_b = predicate_for(Resource::Lessons, &Viewer::new(s.teacher_b, Role::Teacher));
    assert!(
        !s.storage
            .is_visible(Resource::Lessons, &teacher_b, s.lesson_a)
            .await
            .unwrap()
    );
    assert!(
        s.storage
            .is_visible(Resource::Lessons, &teacher_b, s.lesson_b)
            .await
            .unwrap()
    );

    let summary = s
        .storage
        .get_profile_summary(s.teacher_a, Role::Teacher)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(summary.name, "Alice Teacher");
}

fn exam_request(title: &str, lesson_id: i64) -> ExamRequest {
    ExamRequest {
        title: title.into(),
        start_time: Utc::now(),
        end_time: Utc::now() + Duration::hours(1),
        lesson_id,
    }
}

/// B 班再加一个学生，由另一位家长监护
async fn second_family(s: &School) -> (i64, i64) {
    let parent = s
        .storage
        .create_parent(
            ParentInput {
                username: "parent2".into(),
                password: None,
                email: None,
                first_name: "Quinn".into(),
                last_name: "Parent".into(),
                phone: "654321".into(),
                address: None,
                img: None,
            },
            "hash".into(),
        )
        .await
        .unwrap()
        .id;
    let student = s
        .storage
        .create_student(student_input("stu2", s.class_b, s.grade, parent), "hash".into())
        .await
        .unwrap()
        .id;
    (parent, student)
}

#[tokio::test]
async fn test_teacher_sees_only_assignments_of_own_lessons() {
    let s = school().await;
    let assignment = |title: &str, lesson_id: i64| AssignmentRequest {
        title: title.into(),
        start_date: Utc::now(),
        end_date: Utc::now() + Duration::days(7),
        lesson_id,
    };
    let own = s
        .storage
        .create_assignment(assignment("Equations", s.lesson_a))
        .await
        .unwrap()
        .id;
    let other = s
        .storage
        .create_assignment(assignment("Essay", s.lesson_b))
        .await
        .unwrap()
        .id;

    let cases = [
        (Viewer::new(s.teacher_a, Role::Teacher), vec![own]),
        (Viewer::new(s.teacher_b, Role::Teacher), vec![other]),
        (Viewer::new(s.student, Role::Student), vec![own]),
        (Viewer::new(s.parent, Role::Parent), vec![own]),
    ];
    for (viewer, expected) in cases {
        let predicate = predicate_for(Resource::Assignments, &viewer);
        let list = s
            .storage
            .list_assignments(&predicate, &ListFilter::default(), page())
            .await
            .unwrap();
        let ids: Vec<i64> = list.items.iter().map(|a| a.assignment.id).collect();
        assert_eq!(ids, expected, "{viewer:?}");
    }
}

#[tokio::test]
async fn test_exams_follow_lesson_teacher_and_class() {
    let s = school().await;
    let exam_a = s
        .storage
        .create_exam(exam_request("Quiz A", s.lesson_a))
        .await
        .unwrap()
        .id;
    let exam_b = s
        .storage
        .create_exam(exam_request("Quiz B", s.lesson_b))
        .await
        .unwrap()
        .id;
    let (parent_b, student_b) = second_family(&s).await;

    let cases = [
        (Viewer::new(1, Role::Admin), vec![exam_a, exam_b]),
        (Viewer::new(s.teacher_a, Role::Teacher), vec![exam_a]),
        (Viewer::new(s.teacher_b, Role::Teacher), vec![exam_b]),
        (Viewer::new(s.student, Role::Student), vec![exam_a]),
        (Viewer::new(student_b, Role::Student), vec![exam_b]),
        (Viewer::new(parent_b, Role::Parent), vec![exam_b]),
    ];
    for (viewer, expected) in cases {
        let predicate = predicate_for(Resource::Exams, &viewer);
        let list = s
            .storage
            .list_exams(&predicate, &ListFilter::default(), page())
            .await
            .unwrap();
        let ids: Vec<i64> = list.items.iter().map(|e| e.exam.id).collect();
        assert_eq!(ids, expected, "{viewer:?}");
    }
}

#[tokio::test]
async fn test_teacher_sees_supervised_or_taught_classes() {
    let s = school().await;
    // teacher_a 在 B 班没有课程，也不是班主任
    let viewer = Viewer::new(s.teacher_a, Role::Teacher);
    let predicate = predicate_for(Resource::Classes, &viewer);
    let list = s
        .storage
        .list_classes(&predicate, &ListFilter::default(), page())
        .await
        .unwrap();
    let ids: Vec<i64> = list.items.iter().map(|c| c.class.id).collect();
    assert_eq!(ids, vec![s.class_a]);

    // 仅担任班主任的班级
    let supervised = s
        .storage
        .create_class(ClassRequest {
            name: "1C".into(),
            capacity: 20,
            grade_id: s.grade,
            supervisor_id: s.teacher_a,
        })
        .await
        .unwrap()
        .id;
    // 仅在 B 班任教
    let math = s
        .storage
        .list_options(Resource::Subjects, &Predicate::everything())
        .await
        .unwrap()
        .into_iter()
        .find(|o| o.name == "Math")
        .unwrap()
        .id;
    s.storage
        .create_lesson(
            lesson_request("Geometry", math, s.class_b, s.teacher_a),
            Day::Friday,
        )
        .await
        .unwrap();

    let list = s
        .storage
        .list_classes(&predicate, &ListFilter::default(), page())
        .await
        .unwrap();
    let ids: Vec<i64> = list.items.iter().map(|c| c.class.id).collect();
    assert_eq!(ids, vec![s.class_a, s.class_b, supervised]);

    let predicate = predicate_for(Resource::Classes, &Viewer::new(s.teacher_b, Role::Teacher));
    let list = s
        .storage
        .list_classes(&predicate, &ListFilter::default(), page())
        .await
        .unwrap();
    let ids: Vec<i64> = list.items.iter().map(|c| c.class.id).collect();
    assert_eq!(ids, vec![s.class_b]);
}

#[tokio::test]
async fn test_attendance_scoped_by_lesson_teacher_and_child() {
    let s = school().await;
    let (parent_b, student_b) = second_family(&s).await;
    let mark = |student_id: i64, lesson_id: i64| AttendanceRequest {
        date: Utc::now(),
        present: true,
        student_id,
        lesson_id,
    };
    let in_a = s
        .storage
        .create_attendance(mark(s.student, s.lesson_a))
        .await
        .unwrap()
        .id;
    let in_b = s
        .storage
        .create_attendance(mark(student_b, s.lesson_b))
        .await
        .unwrap()
        .id;

    let cases = [
        (Viewer::new(s.teacher_a, Role::Teacher), vec![in_a]),
        (Viewer::new(s.teacher_b, Role::Teacher), vec![in_b]),
        (Viewer::new(s.student, Role::Student), vec![in_a]),
        (Viewer::new(s.parent, Role::Parent), vec![in_a]),
        (Viewer::new(parent_b, Role::Parent), vec![in_b]),
    ];
    for (viewer, expected) in cases {
        let predicate = predicate_for(Resource::Attendance, &viewer);
        let list = s
            .storage
            .list_attendance(&predicate, &ListFilter::default(), page())
            .await
            .unwrap();
        let ids: Vec<i64> = list.items.iter().map(|a| a.attendance.id).collect();
        assert_eq!(ids, expected, "{viewer:?}");
    }
}

#[tokio::test]
async fn test_parent_sees_child_class_and_global_announcements() {
    let s = school().await;
    let (parent_b, _) = second_family(&s).await;
    let notice = |title: &str, class_id: i64| AnnouncementRequest {
        title: title.into(),
        description: String::new(),
        date: Utc::now(),
        class_id,
    };
    let global = s
        .storage
        .create_announcement(notice("Holiday", 0))
        .await
        .unwrap()
        .id;
    let for_a = s
        .storage
        .create_announcement(notice("Trip to zoo", s.class_a))
        .await
        .unwrap()
        .id;
    let for_b = s
        .storage
        .create_announcement(notice("Museum day", s.class_b))
        .await
        .unwrap()
        .id;

    let cases = [
        (Viewer::new(s.parent, Role::Parent), vec![global, for_a]),
        (Viewer::new(parent_b, Role::Parent), vec![global, for_b]),
        (Viewer::new(s.teacher_b, Role::Teacher), vec![global, for_b]),
    ];
    for (viewer, expected) in cases {
        let predicate = predicate_for(Resource::Announcements, &viewer);
        let list = s
            .storage
            .list_announcements(&predicate, &ListFilter::default(), page())
            .await
            .unwrap();
        let mut ids: Vec<i64> = list.items.iter().map(|a| a.announcement.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, expected, "{viewer:?}");
    }
}

#[tokio::test]
async fn test_parent_sees_only_child_results() {
    let s = school().await;
    let (parent_b, student_b) = second_family(&s).await;
    let exam_a = s
        .storage
        .create_exam(exam_request("Quiz A", s.lesson_a))
        .await
        .unwrap()
        .id;
    let exam_b = s
        .storage
        .create_exam(exam_request("Quiz B", s.lesson_b))
        .await
        .unwrap()
        .id;
    let score = |student_id: i64, exam: i64| ResultInput {
        score: 80,
        source: ResultSource::Exam(exam),
        student_id,
    };
    let mine = s
        .storage
        .create_result(score(s.student, exam_a))
        .await
        .unwrap()
        .id;
    let theirs = s
        .storage
        .create_result(score(student_b, exam_b))
        .await
        .unwrap()
        .id;

    for (viewer, expected) in [
        (Viewer::new(s.parent, Role::Parent), mine),
        (Viewer::new(parent_b, Role::Parent), theirs),
    ] {
        let predicate = predicate_for(Resource::Results, &viewer);
        let list = s
            .storage
            .list_results(&predicate, &ListFilter::default(), page())
            .await
            .unwrap();
        let ids: Vec<i64> = list.items.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![expected], "{viewer:?}");
    }
}

#[tokio::test]
async fn test_referenced_lesson_and_class_cannot_be_deleted() {
    let s = school().await;
    let exam = s
        .storage
        .create_exam(exam_request("Quiz", s.lesson_a))
        .await
        .unwrap()
        .id;
    s.storage
        .create_result(ResultInput {
            score: 75,
            source: ResultSource::Exam(exam),
            student_id: s.student,
        })
        .await
        .unwrap();

    assert!(s.storage.delete_lesson(s.lesson_a).await.is_err());
    let exams = s
        .storage
        .list_exams(&Predicate::everything(), &ListFilter::default(), page())
        .await
        .unwrap();
    assert_eq!(exams.pagination.total, 1);
    let results = s
        .storage
        .list_results(&Predicate::everything(), &ListFilter::default(), page())
        .await
        .unwrap();
    assert_eq!(results.items.len(), 1);

    // 学生仍有成绩
    assert!(s.storage.delete_student(s.student).await.is_err());
    assert!(s.storage.get_student(s.student).await.unwrap().is_some());

    // 只被活动引用的班级
    let quiet = s
        .storage
        .create_class(ClassRequest {
            name: "1D".into(),
            capacity: 20,
            grade_id: s.grade,
            supervisor_id: s.teacher_b,
        })
        .await
        .unwrap()
        .id;
    s.storage
        .create_event(EventRequest {
            title: "Fair".into(),
            description: String::new(),
            start_date: Utc::now(),
            end_date: Utc::now() + Duration::hours(1),
            class_id: quiet,
        })
        .await
        .unwrap();
    assert!(s.storage.delete_class(quiet).await.is_err());

    // 引用解除后可以删除
    assert!(s.storage.delete_exam(exam).await.unwrap());
    assert!(s.storage.delete_lesson(s.lesson_a).await.unwrap());
}

#[tokio::test]
async fn test_name_search_folds_ascii_only() {
    let s = school().await;
    let elodie = s
        .storage
        .create_teacher(teacher_input("elodie", "Élodie"), "hash".into())
        .await
        .unwrap()
        .id;

    for needle in ["ÉLODIE", "Élo", "lodie"] {
        let filter = ListFilter {
            search: Some(needle.into()),
            ..Default::default()
        };
        let list = s
            .storage
            .list_teachers(&Predicate::everything(), &filter, page())
            .await
            .unwrap();
        let ids: Vec<i64> = list.items.iter().map(|t| t.teacher.id).collect();
        assert_eq!(ids, vec![elodie], "{needle}");
    }
}
