use serde::Deserialize;

use super::entities::Day;
use crate::utils::validate::{
    FieldErrors, parse_time_of_day, validate_length, validate_positive_id,
};

// 课程表单
#[derive(Debug, Clone, Deserialize)]
pub struct LessonRequest {
    pub name: String,
    pub day: Option<Day>,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub subject_id: i64,
    #[serde(default)]
    pub class_id: i64,
    #[serde(default)]
    pub teacher_id: i64,
}

impl LessonRequest {
    pub fn validate(&self) -> Result<Day, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check("name", validate_length("Name", self.name.trim(), 2, 10));
        let start = parse_time_of_day(&self.start_time);
        let end = parse_time_of_day(&self.end_time);
        match (start, end) {
            (Ok(start), Ok(end)) => {
                if end <= start {
                    errors.add("end_time", "End time must be after start time");
                }
            }
            (start, end) => {
                errors.check("start_time", start.map(|_| ()));
                errors.check("end_time", end.map(|_| ()));
            }
        }
        errors.check(
            "subject_id",
            validate_positive_id(self.subject_id, "Please select a subject"),
        );
        errors.check(
            "class_id",
            validate_positive_id(self.class_id, "Please select a class"),
        );
        errors.check(
            "teacher_id",
            validate_positive_id(self.teacher_id, "Please select a teacher"),
        );
        let Some(day) = self.day else {
            errors.add("day", "Please select a day");
            return Err(errors);
        };
        errors.finish()?;
        Ok(day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lesson_times() {
        let mut req = LessonRequest {
            name: "Math".into(),
            day: Some(Day::Monday),
            start_time: "09:00".into(),
            end_time: "08:00".into(),
            subject_id: 1,
            class_id: 1,
            teacher_id: 1,
        };
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.get("end_time").unwrap(), ["End time must be after start time"]);

        req.end_time = "9:45".into();
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.get("end_time").unwrap(), ["Please enter a valid time"]);

        req.start_time = "24:00".into();
        req.end_time = "29:30".into();
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.get("start_time").unwrap(), ["Please enter a valid time"]);
        assert_eq!(errors.get("end_time").unwrap(), ["Please enter a valid time"]);

        req.start_time = "09:00".into();
        req.end_time = "09:45".into();
        assert_eq!(req.validate().unwrap(), Day::Monday);
    }
}
