use serde::Deserialize;

use super::entities::ResultSource;
use crate::utils::validate::{FieldErrors, validate_positive_id};

pub const RESULT_SOURCE_MESSAGE: &str =
    "Either exam or assignment is required. Please select any one";

// 成绩表单，exam_id 与 assignment_id 必须恰好一个为正
#[derive(Debug, Clone, Deserialize)]
pub struct ResultRequest {
    #[serde(default)]
    pub exam_id: i64,
    #[serde(default)]
    pub assignment_id: i64,
    #[serde(default)]
    pub student_id: i64,
    pub score: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultInput {
    pub score: i32,
    pub source: ResultSource,
    pub student_id: i64,
}

impl ResultRequest {
    pub fn validate(self) -> Result<ResultInput, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(
            "student_id",
            validate_positive_id(self.student_id, "Please select a student"),
        );
        let source = match (self.exam_id > 0, self.assignment_id > 0) {
            (true, false) => Some(ResultSource::Exam(self.exam_id)),
            (false, true) => Some(ResultSource::Assignment(self.assignment_id)),
            _ => {
                errors.add("exam_id", RESULT_SOURCE_MESSAGE);
                errors.add("assignment_id", RESULT_SOURCE_MESSAGE);
                None
            }
        };
        if self.score < 0 {
            errors.add("score", "Score cannot be negative");
        }
        let (Some(source), true) = (source, errors.is_empty()) else {
            return Err(errors);
        };

        Ok(ResultInput {
            score: self.score,
            source,
            student_id: self.student_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(exam_id: i64, assignment_id: i64) -> ResultRequest {
        ResultRequest {
            exam_id,
            assignment_id,
            student_id: 5,
            score: 90,
        }
    }

    #[test]
    fn test_exactly_one_source() {
        assert_eq!(
            request(3, 0).validate().unwrap().source,
            ResultSource::Exam(3)
        );
        assert_eq!(
            request(0, 4).validate().unwrap().source,
            ResultSource::Assignment(4)
        );
    }

    #[test]
    fn test_both_or_neither_rejected() {
        for (exam, assignment) in [(3, 4), (0, 0), (-1, 0)] {
            let errors = request(exam, assignment).validate().unwrap_err();
            assert_eq!(errors.get("exam_id").unwrap(), [RESULT_SOURCE_MESSAGE]);
            assert_eq!(errors.get("assignment_id").unwrap(), [RESULT_SOURCE_MESSAGE]);
        }
    }

    #[test]
    fn test_source_from_columns() {
        assert_eq!(ResultSource::from_columns(Some(1), None), Some(ResultSource::Exam(1)));
        assert_eq!(ResultSource::from_columns(None, None), None);
        assert_eq!(ResultSource::from_columns(Some(1), Some(2)), None);
    }
}
