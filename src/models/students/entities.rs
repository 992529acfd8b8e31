use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::lessons::entities::ScheduleEntry;
use crate::models::users::entities::{Gender, display_name};

// 学生档案
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub blood_group: Option<String>,
    pub birthday: NaiveDate,
    pub gender: Gender,
    pub img: Option<String>,
    pub class_id: i64,
    pub grade_id: i64,
    pub parent_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Student {
    pub fn display_name(&self) -> String {
        display_name(&self.first_name, self.last_name.as_deref())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentListItem {
    #[serde(flatten)]
    pub student: Student,
    pub class_name: Option<String>,
    pub grade_level: Option<i32>,
}

// 学生详情页：本年度出勤率与课程数
#[derive(Debug, Clone, Serialize)]
pub struct StudentDetail {
    #[serde(flatten)]
    pub student: Student,
    pub class_name: Option<String>,
    pub grade_level: Option<i32>,
    pub lesson_count: u64,
    /// 无考勤记录时为 None
    pub attendance_percentage: Option<f64>,
    pub schedule: Vec<ScheduleEntry>,
}
