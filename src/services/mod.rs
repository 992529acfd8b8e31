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

#[cfg(test)]
mod tests;

pub use announcements::AnnouncementService;
pub use assignments::AssignmentService;
pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use classes::ClassService;
pub use dashboard::DashboardService;
pub use events::EventService;
pub use exams::ExamService;
pub use grades::GradeService;
pub use lessons::LessonService;
pub use parents::ParentService;
pub use results::ResultService;
pub use students::StudentService;
pub use subjects::SubjectService;
pub use teachers::TeacherService;
