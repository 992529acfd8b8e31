use serde::{Deserialize, Serialize};

// 班级
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    pub id: i64,
    pub name: String,
    pub capacity: i32,
    pub grade_id: i64,
    pub supervisor_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassListItem {
    #[serde(flatten)]
    pub class: Class,
    pub grade_level: Option<i32>,
    pub supervisor_name: Option<String>,
    pub student_count: u64,
}
