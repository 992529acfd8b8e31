use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::lessons::entities::ScheduleEntry;
use crate::models::users::entities::{Gender, NamedRef, display_name};

// 教师档案
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
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
    pub created_at: DateTime<Utc>,
}

impl Teacher {
    pub fn display_name(&self) -> String {
        display_name(&self.first_name, self.last_name.as_deref())
    }
}

// 教师列表行：附带所教科目与任课班级
#[derive(Debug, Clone, Serialize)]
pub struct TeacherListItem {
    #[serde(flatten)]
    pub teacher: Teacher,
    pub subjects: Vec<NamedRef>,
    pub classes: Vec<NamedRef>,
}

// 教师详情页
#[derive(Debug, Clone, Serialize)]
pub struct TeacherDetail {
    #[serde(flatten)]
    pub teacher: Teacher,
    pub subject_count: u64,
    pub lesson_count: u64,
    pub class_count: u64,
    pub schedule: Vec<ScheduleEntry>,
}
