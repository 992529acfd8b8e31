use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::utils::validate::{FieldErrors, validate_positive_id};

#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceRequest {
    pub date: DateTime<Utc>,
    pub present: bool,
    #[serde(default)]
    pub student_id: i64,
    #[serde(default)]
    pub lesson_id: i64,
}

impl AttendanceRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(
            "student_id",
            validate_positive_id(self.student_id, "Please select a student"),
        );
        errors.check(
            "lesson_id",
            validate_positive_id(self.lesson_id, "Please select a lesson"),
        );
        errors.finish()
    }
}
