use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::utils::validate::{FieldErrors, validate_length};

// 活动表单，class_id <= 0 表示全校
#[derive(Debug, Clone, Deserialize)]
pub struct EventRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub class_id: i64,
}

impl EventRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check("title", validate_length("Title", self.title.trim(), 2, 10));
        if self.end_date < self.start_date {
            errors.add("end_date", "End date must be after start date");
        }
        errors.finish()
    }

    pub fn class_scope(&self) -> Option<i64> {
        (self.class_id > 0).then_some(self.class_id)
    }
}
