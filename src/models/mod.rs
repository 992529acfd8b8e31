pub mod announcements;
pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod classes;
pub mod common;
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
pub mod users;

pub use common::*;

/// 进程启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
