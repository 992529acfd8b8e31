//! 通过完整路由栈验证认证、访问表与增删改行为

use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};
use chrono::NaiveDate;
use sea_orm::{ConnectOptions, Database};
use serde_json::{Value, json};

use crate::models::classes::requests::ClassRequest;
use crate::models::grades::requests::GradeRequest;
use crate::models::lessons::entities::Day;
use crate::models::lessons::requests::LessonRequest;
use crate::models::parents::requests::ParentInput;
use crate::models::students::requests::StudentInput;
use crate::models::subjects::requests::SubjectRequest;
use crate::models::teachers::requests::TeacherInput;
use crate::models::users::entities::{Gender, Role};
use crate::routes;
use crate::storage::Storage;
use crate::storage::sea_orm_storage::SeaOrmStorage;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::hash_password;
use crate::utils::{json_error_handler, query_error_handler};

/// 一个满员班级（容量 1），alice 与 bob 各教一门课
struct Fixture {
    storage: Arc<dyn Storage>,
    grade: i64,
    class: i64,
    alice: i64,
    bob: i64,
    parent: i64,
    student: i64,
    alice_lesson: i64,
    bob_lesson: i64,
}

fn teacher(username: &str) -> TeacherInput {
    TeacherInput {
        username: username.into(),
        password: None,
        email: None,
        first_name: username.into(),
        last_name: None,
        phone: None,
        address: None,
        blood_group: None,
        birthday: NaiveDate::from_ymd_opt(1985, 3, 1).unwrap(),
        gender: Gender::Female,
        img: None,
        subjects: Vec::new(),
    }
}

fn lesson(name: &str, subject_id: i64, class_id: i64, teacher_id: i64) -> LessonRequest {
    LessonRequest {
        name: name.into(),
        day: Some(Day::Tuesday),
        start_time: "10:00".into(),
        end_time: "11:00".into(),
        subject_id,
        class_id,
        teacher_id,
    }
}

async fn fixture() -> Fixture {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.unwrap();
    let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::with_connection(db).await.unwrap());

    let grade = storage
        .create_grade(GradeRequest { level: 2 })
        .await
        .unwrap()
        .id;
    let alice = storage
        .create_teacher(teacher("alice"), "hash".into())
        .await
        .unwrap()
        .id;
    let bob = storage
        .create_teacher(teacher("bob"), "hash".into())
        .await
        .unwrap()
        .id;
    let class = storage
        .create_class(ClassRequest {
            name: "2A".into(),
            capacity: 1,
            grade_id: grade,
            supervisor_id: alice,
        })
        .await
        .unwrap()
        .id;
    let subject = storage
        .create_subject(SubjectRequest {
            name: "Physics".into(),
            teacher_ids: vec![alice, bob],
        })
        .await
        .unwrap()
        .id;
    let alice_lesson = storage
        .create_lesson(lesson("Optics", subject, class, alice), Day::Tuesday)
        .await
        .unwrap()
        .id;
    let bob_lesson = storage
        .create_lesson(lesson("Waves", subject, class, bob), Day::Tuesday)
        .await
        .unwrap()
        .id;
    let parent = storage
        .create_parent(
            ParentInput {
                username: "parent2".into(),
                password: None,
                email: None,
                first_name: "Pat".into(),
                last_name: "Doe".into(),
                phone: "+1 555 0100".into(),
                address: None,
                img: None,
            },
            "hash".into(),
        )
        .await
        .unwrap()
        .id;
    let student = storage
        .create_student(
            StudentInput {
                username: "kid2".into(),
                password: None,
                email: None,
                first_name: "Kid".into(),
                last_name: None,
                phone: None,
                address: None,
                blood_group: None,
                birthday: NaiveDate::from_ymd_opt(2012, 6, 1).unwrap(),
                gender: Gender::Male,
                img: None,
                grade_id: grade,
                class_id: class,
                parent_id: parent,
            },
            "hash".into(),
        )
        .await
        .unwrap()
        .id;

    Fixture {
        storage,
        grade,
        class,
        alice,
        bob,
        parent,
        student,
        alice_lesson,
        bob_lesson,
    }
}

fn bearer(id: i64, role: Role) -> (&'static str, String) {
    let token = JwtUtils::generate_session_token(id, role, "tester", "").unwrap();
    ("Authorization", format!("Bearer {token}"))
}

macro_rules! app {
    ($storage:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($storage.clone()))
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .configure(routes::configure_api_routes),
        )
        .await
    };
}

async fn admin_id(storage: &Arc<dyn Storage>) -> i64 {
    storage.create_admin("root", "hash").await.unwrap().id
}

#[actix_web::test]
async fn test_login_issues_session_and_me_reads_it() {
    let f = fixture().await;
    let hash = hash_password("Secret1!").unwrap();
    f.storage.create_admin("principal", &hash).await.unwrap();
    let app = app!(f.storage);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": "principal", "password": "wrong-1!" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": "principal", "password": "Secret1!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.response().cookies().any(|c| c.name() == "session"));
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["user"]["role"], "admin");
    assert_eq!(body["data"]["expires_in"], 3600);

    let token = body["data"]["access_token"].as_str().unwrap().to_string();
    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["username"], "principal");
    assert_eq!(body["data"]["home_path"], "/admin");
}

#[actix_web::test]
async fn test_route_access_map() {
    let f = fixture().await;
    let app = app!(f.storage);

    let status = |resp: actix_web::dev::ServiceResponse| resp.status();

    let req = test::TestRequest::get().uri("/api/v1/list/lessons").to_request();
    assert_eq!(status(test::call_service(&app, req).await), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/v1/list/subjects")
        .insert_header(bearer(f.alice, Role::Teacher))
        .to_request();
    assert_eq!(status(test::call_service(&app, req).await), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/api/v1/list/teachers")
        .insert_header(bearer(f.alice, Role::Teacher))
        .to_request();
    assert_eq!(status(test::call_service(&app, req).await), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/v1/admin")
        .insert_header(bearer(f.student, Role::Student))
        .to_request();
    assert_eq!(status(test::call_service(&app, req).await), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/api/v1/student")
        .insert_header(bearer(f.student, Role::Student))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["class"]["name"], "2A");
    assert_eq!(body["data"]["schedule"].as_array().unwrap().len(), 2);

    // 令牌中的角色与凭据不一致
    let req = test::TestRequest::get()
        .uri("/api/v1/list/lessons")
        .insert_header(bearer(f.parent, Role::Admin))
        .to_request();
    assert_eq!(status(test::call_service(&app, req).await), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_result_requires_exactly_one_source() {
    let f = fixture().await;
    let admin = admin_id(&f.storage).await;
    let app = app!(f.storage);

    let req = test::TestRequest::post()
        .uri("/api/v1/list/results")
        .insert_header(bearer(admin, Role::Admin))
        .set_json(json!({ "exam_id": 0, "assignment_id": 0, "student_id": f.student, "score": 90 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    let message = "Either exam or assignment is required. Please select any one";
    assert_eq!(body["data"]["exam_id"][0], message);
    assert_eq!(body["data"]["assignment_id"][0], message);
}

#[actix_web::test]
async fn test_teacher_manages_only_own_lesson_exams() {
    let f = fixture().await;
    let app = app!(f.storage);
    let exam = |lesson_id: i64| {
        json!({
            "title": "Quiz",
            "start_time": "2024-05-07T10:00:00Z",
            "end_time": "2024-05-07T11:00:00Z",
            "lesson_id": lesson_id,
        })
    };

    let req = test::TestRequest::post()
        .uri("/api/v1/list/exams")
        .insert_header(bearer(f.bob, Role::Teacher))
        .set_json(exam(f.alice_lesson))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/v1/list/exams")
        .insert_header(bearer(f.bob, Role::Teacher))
        .set_json(exam(f.bob_lesson))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["message"], "Exam created successfully");

    // 成绩仅管理员可修改
    let req = test::TestRequest::post()
        .uri("/api/v1/list/results")
        .insert_header(bearer(f.bob, Role::Teacher))
        .set_json(json!({ "exam_id": 1, "student_id": f.student, "score": 70 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    // bob 的考试列表只包含自己的课程选项
    let req = test::TestRequest::get()
        .uri("/api/v1/list/exams")
        .insert_header(bearer(f.bob, Role::Teacher))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["pagination"]["total"], 1);
    let lessons = body["data"]["options"]["lessons"].as_array().unwrap();
    assert_eq!(lessons.len(), 1);
    assert_eq!(lessons[0]["id"], f.bob_lesson);
}

#[actix_web::test]
async fn test_full_class_rejects_new_student() {
    let f = fixture().await;
    let admin = admin_id(&f.storage).await;
    let app = app!(f.storage);

    let req = test::TestRequest::post()
        .uri("/api/v1/list/students")
        .insert_header(bearer(admin, Role::Admin))
        .set_json(json!({
            "username": "newkid",
            "password": "abc12!x",
            "first_name": "New",
            "birthday": "2012-01-01",
            "gender": "FEMALE",
            "grade_id": f.grade,
            "class_id": f.class,
            "parent_id": f.parent,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["success"], false);
    assert_eq!(body["data"]["message"], "Class capacity is full");
    assert!(f.storage.get_credential_by_username("newkid").await.unwrap().is_none());
}

#[actix_web::test]
async fn test_list_options_only_for_editors() {
    let f = fixture().await;
    let admin = admin_id(&f.storage).await;
    let app = app!(f.storage);

    let req = test::TestRequest::get()
        .uri("/api/v1/list/lessons?q=alice")
        .insert_header(bearer(admin, Role::Admin))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["pagination"]["total"], 1);
    assert!(body["data"]["options"]["subjects"].is_array());
    assert!(body["data"]["options"]["classes"].is_array());
    assert_eq!(body["data"]["options"]["teachers"].as_array().unwrap().len(), 2);

    let req = test::TestRequest::get()
        .uri("/api/v1/list/lessons")
        .insert_header(bearer(f.alice, Role::Teacher))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["pagination"]["total"], 1);
    assert!(body["data"].get("options").is_none());
}
