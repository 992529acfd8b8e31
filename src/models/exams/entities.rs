use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 考试
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    pub id: i64,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub lesson_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExamListItem {
    #[serde(flatten)]
    pub exam: Exam,
    pub subject_name: Option<String>,
    pub class_name: Option<String>,
    pub teacher_name: Option<String>,
}
