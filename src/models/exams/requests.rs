use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::utils::validate::{FieldErrors, validate_length, validate_positive_id};

// 考试表单
#[derive(Debug, Clone, Deserialize)]
pub struct ExamRequest {
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub lesson_id: i64,
}

impl ExamRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check("title", validate_length("Title", self.title.trim(), 2, 10));
        if self.end_time < self.start_time {
            errors.add("end_time", "End time must be after start time");
        }
        errors.check(
            "lesson_id",
            validate_positive_id(self.lesson_id, "Please select a lesson"),
        );
        errors.finish()
    }
}
