use serde::Deserialize;

use crate::utils::validate::{FieldErrors, validate_required};

// 科目表单，teacher_ids 整体替换
#[derive(Debug, Clone, Deserialize)]
pub struct SubjectRequest {
    pub name: String,
    #[serde(default)]
    pub teacher_ids: Vec<i64>,
}

impl SubjectRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check("name", validate_required("Subject name", &self.name));
        if self.teacher_ids.iter().any(|id| *id < 1) {
            errors.add("teacher_ids", "Invalid teacher");
        }
        errors.finish()
    }
}
