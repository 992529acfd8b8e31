use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::FormMode;
use crate::models::users::entities::Gender;
use crate::utils::validate::{
    FieldErrors, non_empty, validate_blood_group, validate_optional_email,
    validate_optional_phone, validate_password, validate_positive_id, validate_required,
    validate_username,
};

// 学生表单
#[derive(Debug, Clone, Deserialize)]
pub struct StudentRequest {
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
    pub grade_id: i64,
    #[serde(default)]
    pub class_id: i64,
    #[serde(default)]
    pub parent_id: i64,
}

#[derive(Debug, Clone)]
pub struct StudentInput {
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
    pub grade_id: i64,
    pub class_id: i64,
    pub parent_id: i64,
}

impl StudentRequest {
    pub fn validate(self, mode: FormMode) -> Result<StudentInput, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check("username", validate_username(&self.username));
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
        errors.check("grade_id", validate_positive_id(self.grade_id, "Grade is required"));
        errors.check("class_id", validate_positive_id(self.class_id, "Class is required"));
        errors.check("parent_id", validate_positive_id(self.parent_id, "Parent is required"));
        if self.birthday.is_none() {
            errors.add("birthday", "Please enter birth date");
        }
        if self.gender.is_none() {
            errors.add("gender", "Gender is required");
        }

        let (Some(birthday), Some(gender)) = (self.birthday, self.gender) else {
            return Err(errors);
        };
        errors.finish()?;

        Ok(StudentInput {
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
            grade_id: self.grade_id,
            class_id: self.class_id,
            parent_id: self.parent_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foreign_keys_required() {
        let req = StudentRequest {
            username: "kid01".into(),
            password: Some("abc12!".into()),
            email: None,
            first_name: "Kid".into(),
            last_name: None,
            phone: None,
            address: None,
            blood_group: None,
            birthday: NaiveDate::from_ymd_opt(2014, 9, 1),
            gender: Some(Gender::Female),
            img: None,
            grade_id: 0,
            class_id: -1,
            parent_id: 0,
        };
        let errors = req.validate(FormMode::Create).unwrap_err();
        assert_eq!(errors.get("grade_id").unwrap(), ["Grade is required"]);
        assert_eq!(errors.get("class_id").unwrap(), ["Class is required"]);
        assert_eq!(errors.get("parent_id").unwrap(), ["Parent is required"]);
    }
}
