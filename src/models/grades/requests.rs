use serde::Deserialize;

use crate::utils::validate::FieldErrors;

#[derive(Debug, Clone, Deserialize)]
pub struct GradeRequest {
    #[serde(default)]
    pub level: i32,
}

impl GradeRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.level < 1 {
            errors.add("level", "Level must be a positive number");
        }
        errors.finish()
    }
}
