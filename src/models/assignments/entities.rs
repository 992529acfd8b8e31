use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 作业
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: i64,
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub lesson_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignmentListItem {
    #[serde(flatten)]
    pub assignment: Assignment,
    pub subject_name: Option<String>,
    pub class_name: Option<String>,
    pub teacher_name: Option<String>,
}
