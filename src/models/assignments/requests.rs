use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::utils::validate::{FieldErrors, validate_length, validate_positive_id};

// 作业表单
#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentRequest {
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub lesson_id: i64,
}

impl AssignmentRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check("title", validate_length("Title", self.title.trim(), 3, 20));
        if self.end_date < self.start_date {
            errors.add("end_date", "Due date must be after start date");
        }
        errors.check(
            "lesson_id",
            validate_positive_id(self.lesson_id, "Please select a lesson"),
        );
        errors.finish()
    }
}
