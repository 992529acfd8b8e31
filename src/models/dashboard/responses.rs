use chrono::NaiveDate;
use serde::Serialize;

use crate::models::announcements::entities::Announcement;
use crate::models::attendance::entities::AttendanceDay;
use crate::models::events::entities::Event;
use crate::models::lessons::entities::ScheduleEntry;
use crate::models::users::entities::NamedRef;

// 各角色用户数
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserCounts {
    pub admins: u64,
    pub teachers: u64,
    pub students: u64,
    pub parents: u64,
}

#[derive(Debug, Serialize)]
pub struct AdminDashboard {
    pub counts: UserCounts,
    /// 本周一至周六
    pub attendance: Vec<AttendanceDay>,
    pub date: NaiveDate,
    pub events: Vec<Event>,
    pub announcements: Vec<Announcement>,
}

#[derive(Debug, Serialize)]
pub struct TeacherDashboard {
    pub schedule: Vec<ScheduleEntry>,
    pub date: NaiveDate,
    pub events: Vec<Event>,
    pub announcements: Vec<Announcement>,
}

#[derive(Debug, Serialize)]
pub struct StudentDashboard {
    pub class: Option<NamedRef>,
    pub schedule: Vec<ScheduleEntry>,
    pub date: NaiveDate,
    pub events: Vec<Event>,
    pub announcements: Vec<Announcement>,
}

#[derive(Debug, Serialize)]
pub struct ChildSchedule {
    pub student: NamedRef,
    pub schedule: Vec<ScheduleEntry>,
}

#[derive(Debug, Serialize)]
pub struct ParentDashboard {
    pub children: Vec<ChildSchedule>,
    pub announcements: Vec<Announcement>,
}
