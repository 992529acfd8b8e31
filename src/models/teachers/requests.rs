use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::FormMode;
use crate::models::users::entities::Gender;
use crate::utils::validate::{
    FieldErrors, non_empty, validate_blood_group, validate_optional_email,
    validate_optional_phone, validate_password, validate_required, validate_teacher_username,
};

// 教师表单
#[derive(Debug, Clone, Deserialize)]
pub struct TeacherRequest {
    pub username: String,
    pub password: Option<String>,
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub blood_group: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub img: Option<String>,
    #[serde(default)]
    pub subjects: Vec<i64>,
}

// 校验通过的教师数据
#[derive(Debug, Clone)]
pub struct TeacherInput {
    pub username: String,
    pub password: Option<String>,
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub blood_group: Option<String>,
    pub birthday: NaiveDate,
    pub gender: Gender,
    pub img: Option<String>,
    pub subjects: Vec<i64>,
}

impl TeacherRequest {
    pub fn validate(self, mode: FormMode) -> Result<TeacherInput, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check("username", validate_teacher_username(&self.username));
        let password = non_empty(self.password);
        match (&password, mode) {
            (Some(p), FormMode::Create) => errors.check("password", validate_password(p)),
            (None, FormMode::Create) => errors.add("password", "Password is required"),
            _ => {}
        }
        errors.check("email", validate_optional_email(self.email.as_deref()));
        errors.check("first_name", validate_required("First name", &self.first_name));
        errors.check("phone", validate_optional_phone(self.phone.as_deref()));
        errors.check("blood_group", validate_blood_group(self.blood_group.as_deref()));
        if self.birthday.is_none() {
            errors.add("birthday", "Please enter birth date");
        }
        if self.gender.is_none() {
            errors.add("gender", "Gender is required");
        }
        if self.subjects.iter().any(|id| *id < 1) {
            errors.add("subjects", "Invalid subject");
        }

        let (Some(birthday), Some(gender)) = (self.birthday, self.gender) else {
            return Err(errors);
        };
        errors.finish()?;

        let mut subjects = self.subjects;
        subjects.sort_unstable();
        subjects.dedup();

        Ok(TeacherInput {
            username: self.username.trim().to_string(),
            password,
            email: non_empty(self.email),
            first_name: self.first_name.trim().to_string(),
            last_name: non_empty(self.last_name),
            phone: non_empty(self.phone),
            address: non_empty(self.address),
            blood_group: non_empty(self.blood_group),
            birthday,
            gender,
            img: non_empty(self.img),
            subjects,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> TeacherRequest {
        TeacherRequest {
            username: "mr_smith".into(),
            password: Some("abc12!".into()),
            email: Some("".into()),
            first_name: "John".into(),
            last_name: Some("Smith".into()),
            phone: None,
            address: None,
            blood_group: Some("O +ve".into()),
            birthday: NaiveDate::from_ymd_opt(1980, 1, 2),
            gender: Some(Gender::Male),
            img: None,
            subjects: vec![3, 1, 3],
        }
    }

    #[test]
    fn test_valid_teacher_normalizes() {
        let input = request().validate(FormMode::Create).unwrap();
        assert_eq!(input.email, None);
        assert_eq!(input.subjects, vec![1, 3]);
    }

    #[test]
    fn test_password_required_only_on_create() {
        let mut req = request();
        req.password = None;
        let errors = req.clone().validate(FormMode::Create).unwrap_err();
        assert_eq!(errors.get("password").unwrap(), ["Password is required"]);
        assert!(req.validate(FormMode::Update).is_ok());
    }

    #[test]
    fn test_missing_birthday_and_gender() {
        let mut req = request();
        req.birthday = None;
        req.gender = None;
        req.username = "Bad".into();
        let errors = req.validate(FormMode::Create).unwrap_err();
        assert!(errors.get("birthday").is_some());
        assert!(errors.get("gender").is_some());
        assert!(errors.get("username").is_some());
    }
}
