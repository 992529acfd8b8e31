use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 考勤记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendance {
    pub id: i64,
    pub date: DateTime<Utc>,
    pub present: bool,
    pub student_id: i64,
    pub lesson_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttendanceListItem {
    #[serde(flatten)]
    pub attendance: Attendance,
    pub student_name: Option<String>,
    pub lesson_name: Option<String>,
}

// 按工作日汇总的出勤人次
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceDay {
    pub name: String,
    pub present: u64,
    pub absent: u64,
}
