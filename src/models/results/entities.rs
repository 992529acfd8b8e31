use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 成绩来源：考试或作业，二者取其一
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ResultSource {
    Exam(i64),
    Assignment(i64),
}

impl ResultSource {
    pub fn exam_id(&self) -> Option<i64> {
        match self {
            ResultSource::Exam(id) => Some(*id),
            ResultSource::Assignment(_) => None,
        }
    }

    pub fn assignment_id(&self) -> Option<i64> {
        match self {
            ResultSource::Assignment(id) => Some(*id),
            ResultSource::Exam(_) => None,
        }
    }

    /// 从两个可空外键还原；都为空（来源已删除）或同时存在时返回 None
    pub fn from_columns(exam_id: Option<i64>, assignment_id: Option<i64>) -> Option<Self> {
        match (exam_id, assignment_id) {
            (Some(id), None) => Some(ResultSource::Exam(id)),
            (None, Some(id)) => Some(ResultSource::Assignment(id)),
            _ => None,
        }
    }
}

// 成绩记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub id: i64,
    pub score: i32,
    pub source: ResultSource,
    pub student_id: i64,
}

// 成绩列表行，标题/教师/班级取自考试或作业所属课程
#[derive(Debug, Clone, Serialize)]
pub struct ResultListItem {
    pub id: i64,
    pub score: i32,
    pub source: ResultSource,
    pub title: String,
    pub student_id: i64,
    pub student_name: Option<String>,
    pub teacher_name: Option<String>,
    pub class_name: Option<String>,
    pub start_time: DateTime<Utc>,
}
