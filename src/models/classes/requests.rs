use serde::Deserialize;

use crate::utils::validate::{FieldErrors, validate_length, validate_positive_id};

// 班级表单
#[derive(Debug, Clone, Deserialize)]
pub struct ClassRequest {
    pub name: String,
    #[serde(default)]
    pub capacity: i32,
    #[serde(default)]
    pub grade_id: i64,
    #[serde(default)]
    pub supervisor_id: i64,
}

impl ClassRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check("name", validate_length("Name", self.name.trim(), 2, 10));
        if self.capacity < 1 {
            errors.add("capacity", "Capacity is required");
        }
        errors.check(
            "grade_id",
            validate_positive_id(self.grade_id, "Please select a grade"),
        );
        errors.check(
            "supervisor_id",
            validate_positive_id(self.supervisor_id, "Please select a teacher"),
        );
        errors.finish()
    }
}
