use serde::Deserialize;

use crate::models::FormMode;
use crate::utils::validate::{
    FieldErrors, non_empty, validate_optional_email, validate_password, validate_required,
    validate_username,
};

// 家长表单
#[derive(Debug, Clone, Deserialize)]
pub struct ParentRequest {
    pub username: String,
    pub password: Option<String>,
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: Option<String>,
    pub img: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ParentInput {
    pub username: String,
    pub password: Option<String>,
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: Option<String>,
    pub img: Option<String>,
}

impl ParentRequest {
    pub fn validate(self, mode: FormMode) -> Result<ParentInput, FieldErrors> {
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
        errors.check("last_name", validate_required("Last name", &self.last_name));
        errors.check("phone", validate_required("Phone number", &self.phone));
        errors.finish()?;

        Ok(ParentInput {
            username: self.username.trim().to_string(),
            password,
            email: non_empty(self.email),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: non_empty(self.address),
            img: non_empty(self.img),
        })
    }
}
