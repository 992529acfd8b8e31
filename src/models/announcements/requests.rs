use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::utils::validate::{FieldErrors, validate_length};

// 公告表单，class_id <= 0 表示全校
#[derive(Debug, Clone, Deserialize)]
pub struct AnnouncementRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub class_id: i64,
}

impl AnnouncementRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check("title", validate_length("Title", self.title.trim(), 3, 20));
        errors.finish()
    }

    pub fn class_scope(&self) -> Option<i64> {
        (self.class_id > 0).then_some(self.class_id)
    }
}
