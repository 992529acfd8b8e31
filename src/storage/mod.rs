use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::errors::Result;
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

pub mod sea_orm_storage;

/// 存储层接口
///
/// 列表方法接收角色谓词与用户筛选条件，二者以 AND 组合。
/// 更新返回 `None` 表示记录不存在，删除返回是否删除了记录。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 凭据与会话
    async fn get_credential_by_id(&self, id: i64) -> Result<Option<Credential>>;
    async fn get_credential_by_username(&self, username: &str) -> Result<Option<Credential>>;
    async fn count_credentials(&self) -> Result<u64>;
    // 创建管理员凭据与档案
    async fn create_admin(&self, username: &str, password_hash: &str) -> Result<Credential>;
    // 会话展示用的名称与头像
    async fn get_profile_summary(&self, id: i64, role: Role) -> Result<Option<ProfileSummary>>;

    /// 教师
    async fn list_teachers(
        &self,
        predicate: &Predicate,
        filter: &ListFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<TeacherListItem>>;
    async fn get_teacher_detail(&self, id: i64) -> Result<Option<TeacherDetail>>;
    // 凭据与档案在同一事务中写入
    async fn create_teacher(&self, input: TeacherInput, password_hash: String) -> Result<Teacher>;
    // 科目整体替换，不修改密码
    async fn update_teacher(&self, id: i64, input: TeacherInput) -> Result<Option<Teacher>>;
    // 凭据与档案在同一事务中删除
    async fn delete_teacher(&self, id: i64) -> Result<bool>;

    /// 学生
    async fn list_students(
        &self,
        predicate: &Predicate,
        filter: &ListFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<StudentListItem>>;
    async fn get_student(&self, id: i64) -> Result<Option<Student>>;
    async fn get_student_detail(
        &self,
        id: i64,
        attendance_since: DateTime<Utc>,
    ) -> Result<Option<StudentDetail>>;
    // 班级满员时返回 BusinessRule 错误且不写入
    async fn create_student(&self, input: StudentInput, password_hash: String) -> Result<Student>;
    async fn update_student(&self, id: i64, input: StudentInput) -> Result<Option<Student>>;
    async fn delete_student(&self, id: i64) -> Result<bool>;
    async fn list_children(&self, parent_id: i64) -> Result<Vec<Student>>;

    /// 家长
    async fn list_parents(
        &self,
        predicate: &Predicate,
        filter: &ListFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<ParentListItem>>;
    async fn create_parent(&self, input: ParentInput, password_hash: String) -> Result<Parent>;
    async fn update_parent(&self, id: i64, input: ParentInput) -> Result<Option<Parent>>;
    async fn delete_parent(&self, id: i64) -> Result<bool>;

    /// 年级
    async fn list_grades(
        &self,
        predicate: &Predicate,
        page: PageRequest,
    ) -> Result<PaginatedResponse<Grade>>;
    async fn create_grade(&self, req: GradeRequest) -> Result<Grade>;

    /// 班级
    async fn list_classes(
        &self,
        predicate: &Predicate,
        filter: &ListFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<ClassListItem>>;
    async fn get_class(&self, id: i64) -> Result<Option<Class>>;
    async fn create_class(&self, req: ClassRequest) -> Result<Class>;
    async fn update_class(&self, id: i64, req: ClassRequest) -> Result<Option<Class>>;
    async fn delete_class(&self, id: i64) -> Result<bool>;

    /// 科目
    async fn list_subjects(
        &self,
        predicate: &Predicate,
        filter: &ListFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<SubjectListItem>>;
    async fn create_subject(&self, req: SubjectRequest) -> Result<Subject>;
    async fn update_subject(&self, id: i64, req: SubjectRequest) -> Result<Option<Subject>>;
    async fn delete_subject(&self, id: i64) -> Result<bool>;

    /// 课程
    async fn list_lessons(
        &self,
        predicate: &Predicate,
        filter: &ListFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<LessonListItem>>;
    // 按星期与开始时间排序的课表
    async fn list_schedule(&self, predicate: &Predicate) -> Result<Vec<ScheduleEntry>>;
    async fn create_lesson(&self, req: LessonRequest, day: Day) -> Result<Lesson>;
    async fn update_lesson(&self, id: i64, req: LessonRequest, day: Day)
    -> Result<Option<Lesson>>;
    async fn delete_lesson(&self, id: i64) -> Result<bool>;

    /// 考试
    async fn list_exams(
        &self,
        predicate: &Predicate,
        filter: &ListFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<ExamListItem>>;
    async fn create_exam(&self, req: ExamRequest) -> Result<Exam>;
    async fn update_exam(&self, id: i64, req: ExamRequest) -> Result<Option<Exam>>;
    async fn delete_exam(&self, id: i64) -> Result<bool>;

    /// 作业
    async fn list_assignments(
        &self,
        predicate: &Predicate,
        filter: &ListFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<AssignmentListItem>>;
    async fn create_assignment(&self, req: AssignmentRequest) -> Result<Assignment>;
    async fn update_assignment(
        &self,
        id: i64,
        req: AssignmentRequest,
    ) -> Result<Option<Assignment>>;
    async fn delete_assignment(&self, id: i64) -> Result<bool>;

    /// 成绩
    // 考试与作业均缺失的成绩不出现在 items 中，但计入 total
    async fn list_results(
        &self,
        predicate: &Predicate,
        filter: &ListFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<ResultListItem>>;
    async fn create_result(&self, input: ResultInput) -> Result<ResultRecord>;
    async fn update_result(&self, id: i64, input: ResultInput) -> Result<Option<ResultRecord>>;
    async fn delete_result(&self, id: i64) -> Result<bool>;

    /// 考勤
    async fn list_attendance(
        &self,
        predicate: &Predicate,
        filter: &ListFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<AttendanceListItem>>;
    async fn create_attendance(&self, req: AttendanceRequest) -> Result<Attendance>;
    async fn update_attendance(
        &self,
        id: i64,
        req: AttendanceRequest,
    ) -> Result<Option<Attendance>>;
    async fn delete_attendance(&self, id: i64) -> Result<bool>;
    // 自 week_start 起周一至周六每天的出勤与缺勤人次
    async fn attendance_week_summary(
        &self,
        week_start: DateTime<Utc>,
    ) -> Result<Vec<AttendanceDay>>;

    /// 活动
    async fn list_events(
        &self,
        predicate: &Predicate,
        filter: &ListFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<EventListItem>>;
    // 开始时间落在 [from, to) 的活动
    async fn list_events_between(
        &self,
        predicate: &Predicate,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Event>>;
    async fn create_event(&self, req: EventRequest) -> Result<Event>;
    async fn update_event(&self, id: i64, req: EventRequest) -> Result<Option<Event>>;
    async fn delete_event(&self, id: i64) -> Result<bool>;

    /// 公告
    async fn list_announcements(
        &self,
        predicate: &Predicate,
        filter: &ListFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<AnnouncementListItem>>;
    async fn latest_announcements(
        &self,
        predicate: &Predicate,
        limit: u64,
    ) -> Result<Vec<Announcement>>;
    async fn create_announcement(&self, req: AnnouncementRequest) -> Result<Announcement>;
    async fn update_announcement(
        &self,
        id: i64,
        req: AnnouncementRequest,
    ) -> Result<Option<Announcement>>;
    async fn delete_announcement(&self, id: i64) -> Result<bool>;

    /// 统计与辅助查询
    async fn count_users_by_role(&self) -> Result<UserCounts>;
    // 表单下拉选项，受角色谓词约束
    async fn list_options(&self, resource: Resource, predicate: &Predicate)
    -> Result<Vec<NamedRef>>;
    // 记录是否存在且在谓词范围内
    async fn is_visible(&self, resource: Resource, predicate: &Predicate, id: i64)
    -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
