pub mod announcements;
pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod classes;
pub mod dashboard;
pub mod events;
pub mod exams;
pub mod grades;
pub mod lessons;
pub mod parents;
pub mod results;
pub mod students;
pub mod subjects;
pub mod teachers;

pub use announcements::configure_announcements_routes;
pub use assignments::configure_assignments_routes;
pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use classes::configure_classes_routes;
pub use dashboard::configure_dashboard_routes;
pub use events::configure_events_routes;
pub use exams::configure_exams_routes;
pub use grades::configure_grades_routes;
pub use lessons::configure_lessons_routes;
pub use parents::configure_parents_routes;
pub use results::configure_results_routes;
pub use students::configure_students_routes;
pub use subjects::configure_subjects_routes;
pub use teachers::configure_teachers_routes;

use actix_web::web;

/// 注册全部 API 路由
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_dashboard_routes)
        .configure(configure_teachers_routes)
        .configure(configure_students_routes)
        .configure(configure_parents_routes)
        .configure(configure_grades_routes)
        .configure(configure_classes_routes)
        .configure(configure_subjects_routes)
        .configure(configure_lessons_routes)
        .configure(configure_exams_routes)
        .configure(configure_assignments_routes)
        .configure(configure_results_routes)
        .configure(configure_attendance_routes)
        .configure(configure_events_routes)
        .configure(configure_announcements_routes);
}
