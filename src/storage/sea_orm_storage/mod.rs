//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod announcements;
mod assignments;
mod attendance;
mod classes;
mod events;
mod exams;
mod grades;
mod lessons;
mod lookup;
mod options;
mod parents;
mod results;
mod scope;
mod students;
mod subjects;
mod teachers;
mod users;

#[cfg(test)]
mod tests;

use crate::config::AppConfig;
use crate::errors::{Result, SchoolError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        let storage = Self::with_connection(db).await?;
        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(storage)
    }

    /// 基于已有连接创建实例并运行迁移
    pub async fn with_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| SchoolError::database_operation(format!("数据库迁移失败: {e}")))?;

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchoolError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchoolError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    PageRequest, PaginatedResponse,
    announcements::{
        entities::{Announcement, AnnouncementListItem},
        requests::AnnouncementRequest,
    },
    assignments::{
        entities::{Assignment, AssignmentListItem},
        requests::AssignmentRequest,
    },
    attendance::{
        entities::{Attendance, AttendanceDay, AttendanceListItem},
        requests::AttendanceRequest,
    },
    classes::{
        entities::{Class, ClassListItem},
        requests::ClassRequest,
    },
    dashboard::responses::UserCounts,
    events::{
        entities::{Event, EventListItem},
        requests::EventRequest,
    },
    exams::{
        entities::{Exam, ExamListItem},
        requests::ExamRequest,
    },
    grades::{entities::Grade, requests::GradeRequest},
    lessons::{
        entities::{Day, Lesson, LessonListItem, ScheduleEntry},
        requests::LessonRequest,
    },
    parents::{
        entities::{Parent, ParentListItem},
        requests::ParentInput,
    },
    results::{
        entities::{ResultListItem, ResultRecord},
        requests::ResultInput,
    },
    students::{
        entities::{Student, StudentDetail, StudentListItem},
        requests::StudentInput,
    },
    subjects::{
        entities::{Subject, SubjectListItem},
        requests::SubjectRequest,
    },
    teachers::{
        entities::{Teacher, TeacherDetail, TeacherListItem},
        requests::TeacherInput,
    },
    users::entities::{Credential, NamedRef, ProfileSummary, Role},
};
use crate::policy::{ListFilter, Predicate, Resource};
use crate::storage::Storage;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
impl Storage for SeaOrmStorage {
    // 凭据模块
    async fn get_credential_by_id(&self, id: i64) -> Result<Option<Credential>> {
        self.get_credential_by_id_impl(id).await
    }

    async fn get_credential_by_username(&self, username: &str) -> Result<Option<Credential>> {
        self.get_credential_by_username_impl(username).await
    }

    async fn count_credentials(&self) -> Result<u64> {
        self.count_credentials_impl().await
    }

    async fn create_admin(&self, username: &str, password_hash: &str) -> Result<Credential> {
        self.create_admin_impl(username, password_hash).await
    }

    async fn get_profile_summary(&self, id: i64, role: Role) -> Result<Option<ProfileSummary>> {
        self.get_profile_summary_impl(id, role).await
    }

    // 教师模块
    async fn list_teachers(
        &self,
        predicate: &Predicate,
        filter: &ListFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<TeacherListItem>> {
        self.list_teachers_impl(predicate, filter, page).await
    }

    async fn get_teacher_detail(&self, id: i64) -> Result<Option<TeacherDetail>> {
        self.get_teacher_detail_impl(id).await
    }

    async fn create_teacher(&self, input: TeacherInput, password_hash: String) -> Result<Teacher> {
        self.create_teacher_impl(input, password_hash).await
    }

    async fn update_teacher(&self, id: i64, input: TeacherInput) -> Result<Option<Teacher>> {
        self.update_teacher_impl(id, input).await
    }

    async fn delete_teacher(&self, id: i64) -> Result<bool> {
        self.delete_teacher_impl(id).await
    }

    // 学生模块
    async fn list_students(
        &self,
        predicate: &Predicate,
        filter: &ListFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<StudentListItem>> {
        self.list_students_impl(predicate, filter, page).await
    }

    async fn get_student(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_impl(id).await
    }

    async fn get_student_detail(
        &self,
        id: i64,
        attendance_since: DateTime<Utc>,
    ) -> Result<Option<StudentDetail>> {
        self.get_student_detail_impl(id, attendance_since).await
    }

    async fn create_student(&self, input: StudentInput, password_hash: String) -> Result<Student> {
        self.create_student_impl(input, password_hash).await
    }

    async fn update_student(&self, id: i64, input: StudentInput) -> Result<Option<Student>> {
        self.update_student_impl(id, input).await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    async fn list_children(&self, parent_id: i64) -> Result<Vec<Student>> {
        self.list_children_impl(parent_id).await
    }

    // 家长模块
    async fn list_parents(
        &self,
        predicate: &Predicate,
        filter: &ListFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<ParentListItem>> {
        self.list_parents_impl(predicate, filter, page).await
    }

    async fn create_parent(&self, input: ParentInput, password_hash: String) -> Result<Parent> {
        self.create_parent_impl(input, password_hash).await
    }

    async fn update_parent(&self, id: i64, input: ParentInput) -> Result<Option<Parent>> {
        self.update_parent_impl(id, input).await
    }

    async fn delete_parent(&self, id: i64) -> Result<bool> {
        self.delete_parent_impl(id).await
    }

    // 年级模块
    async fn list_grades(
        &self,
        predicate: &Predicate,
        page: PageRequest,
    ) -> Result<PaginatedResponse<Grade>> {
        self.list_grades_impl(predicate, page).await
    }

    async fn create_grade(&self, req: GradeRequest) -> Result<Grade> {
        self.create_grade_impl(req).await
    }

    // 班级模块
    async fn list_classes(
        &self,
        predicate: &Predicate,
        filter: &ListFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<ClassListItem>> {
        self.list_classes_impl(predicate, filter, page).await
    }

    async fn get_class(&self, id: i64) -> Result<Option<Class>> {
        self.get_class_impl(id).await
    }

    async fn create_class(&self, req: ClassRequest) -> Result<Class> {
        self.create_class_impl(req).await
    }

    async fn update_class(&self, id: i64, req: ClassRequest) -> Result<Option<Class>> {
        self.update_class_impl(id, req).await
    }

    async fn delete_class(&self, id: i64) -> Result<bool> {
        self.delete_class_impl(id).await
    }

    // 科目模块
    async fn list_subjects(
        &self,
        predicate: &Predicate,
        filter: &ListFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<SubjectListItem>> {
        self.list_subjects_impl(predicate, filter, page).await
    }

    async fn create_subject(&self, req: SubjectRequest) -> Result<Subject> {
        self.create_subject_impl(req).await
    }

    async fn update_subject(&self, id: i64, req: SubjectRequest) -> Result<Option<Subject>> {
        self.update_subject_impl(id, req).await
    }

    async fn delete_subject(&self, id: i64) -> Result<bool> {
        self.delete_subject_impl(id).await
    }

    // 课程模块
    async fn list_lessons(
        &self,
        predicate: &Predicate,
        filter: &ListFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<LessonListItem>> {
        self.list_lessons_impl(predicate, filter, page).await
    }

    async fn list_schedule(&self, predicate: &Predicate) -> Result<Vec<ScheduleEntry>> {
        self.list_schedule_impl(predicate).await
    }

    async fn create_lesson(&self, req: LessonRequest, day: Day) -> Result<Lesson> {
        self.create_lesson_impl(req, day).await
    }

    async fn update_lesson(
        &self,
        id: i64,
        req: LessonRequest,
        day: Day,
    ) -> Result<Option<Lesson>> {
        self.update_lesson_impl(id, req, day).await
    }

    async fn delete_lesson(&self, id: i64) -> Result<bool> {
        self.delete_lesson_impl(id).await
    }

    // 考试模块
    async fn list_exams(
        &self,
        predicate: &Predicate,
        filter: &ListFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<ExamListItem>> {
        self.list_exams_impl(predicate, filter, page).await
    }

    async fn create_exam(&self, req: ExamRequest) -> Result<Exam> {
        self.create_exam_impl(req).await
    }

    async fn update_exam(&self, id: i64, req: ExamRequest) -> Result<Option<Exam>> {
        self.update_exam_impl(id, req).await
    }

    async fn delete_exam(&self, id: i64) -> Result<bool> {
        self.delete_exam_impl(id).await
    }

    // 作业模块
    async fn list_assignments(
        &self,
        predicate: &Predicate,
        filter: &ListFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<AssignmentListItem>> {
        self.list_assignments_impl(predicate, filter, page).await
    }

    async fn create_assignment(&self, req: AssignmentRequest) -> Result<Assignment> {
        self.create_assignment_impl(req).await
    }

    async fn update_assignment(
        &self,
        id: i64,
        req: AssignmentRequest,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(id, req).await
    }

    async fn delete_assignment(&self, id: i64) -> Result<bool> {
        self.delete_assignment_impl(id).await
    }

    // 成绩模块
    async fn list_results(
        &self,
        predicate: &Predicate,
        filter: &ListFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<ResultListItem>> {
        self.list_results_impl(predicate, filter, page).await
    }

    async fn create_result(&self, input: ResultInput) -> Result<ResultRecord> {
        self.create_result_impl(input).await
    }

    async fn update_result(&self, id: i64, input: ResultInput) -> Result<Option<ResultRecord>> {
        self.update_result_impl(id, input).await
    }

    async fn delete_result(&self, id: i64) -> Result<bool> {
        self.delete_result_impl(id).await
    }

    // 考勤模块
    async fn list_attendance(
        &self,
        predicate: &Predicate,
        filter: &ListFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<AttendanceListItem>> {
        self.list_attendance_impl(predicate, filter, page).await
    }

    async fn create_attendance(&self, req: AttendanceRequest) -> Result<Attendance> {
        self.create_attendance_impl(req).await
    }

    async fn update_attendance(
        &self,
        id: i64,
        req: AttendanceRequest,
    ) -> Result<Option<Attendance>> {
        self.update_attendance_impl(id, req).await
    }

    async fn delete_attendance(&self, id: i64) -> Result<bool> {
        self.delete_attendance_impl(id).await
    }

    async fn attendance_week_summary(
        &self,
        week_start: DateTime<Utc>,
    ) -> Result<Vec<AttendanceDay>> {
        self.attendance_week_summary_impl(week_start).await
    }

    // 活动模块
    async fn list_events(
        &self,
        predicate: &Predicate,
        filter: &ListFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<EventListItem>> {
        self.list_events_impl(predicate, filter, page).await
    }

    async fn list_events_between(
        &self,
        predicate: &Predicate,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Event>> {
        self.list_events_between_impl(predicate, from, to).await
    }

    async fn create_event(&self, req: EventRequest) -> Result<Event> {
        self.create_event_impl(req).await
    }

    async fn update_event(&self, id: i64, req: EventRequest) -> Result<Option<Event>> {
        self.update_event_impl(id, req).await
    }

    async fn delete_event(&self, id: i64) -> Result<bool> {
        self.delete_event_impl(id).await
    }

    // 公告模块
    async fn list_announcements(
        &self,
        predicate: &Predicate,
        filter: &ListFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<AnnouncementListItem>> {
        self.list_announcements_impl(predicate, filter, page).await
    }

    async fn latest_announcements(
        &self,
        predicate: &Predicate,
        limit: u64,
    ) -> Result<Vec<Announcement>> {
        self.latest_announcements_impl(predicate, limit).await
    }

    async fn create_announcement(&self, req: AnnouncementRequest) -> Result<Announcement> {
        self.create_announcement_impl(req).await
    }

    async fn update_announcement(
        &self,
        id: i64,
        req: AnnouncementRequest,
    ) -> Result<Option<Announcement>> {
        self.update_announcement_impl(id, req).await
    }

    async fn delete_announcement(&self, id: i64) -> Result<bool> {
        self.delete_announcement_impl(id).await
    }

    // 统计与辅助查询
    async fn count_users_by_role(&self) -> Result<UserCounts> {
        self.count_users_by_role_impl().await
    }

    async fn list_options(
        &self,
        resource: Resource,
        predicate: &Predicate,
    ) -> Result<Vec<NamedRef>> {
        self.list_options_impl(resource, predicate).await
    }

    async fn is_visible(
        &self,
        resource: Resource,
        predicate: &Predicate,
        id: i64,
    ) -> Result<bool> {
        self.is_visible_impl(resource, predicate, id).await
    }
}
