use std::collections::BTreeMap;

use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static TEACHER_USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z\d_]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 \-]{5,18}[0-9]$").expect("Invalid phone regex"));

pub const BLOOD_GROUPS: [&str; 8] = [
    "A +ve", "A -ve", "B +ve", "B -ve", "AB +ve", "AB -ve", "O +ve", "O -ve",
];

/// 字段级校验错误：字段名 → 错误信息列表
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    /// 记录校验函数返回的错误
    pub fn check(&mut self, field: &'static str, result: Result<(), String>) {
        if let Err(message) = result {
            self.add(field, message);
        }
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn finish(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, messages)| format!("{field}: {}", messages.join(", ")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// 字符长度校验，`label` 用于拼接提示
pub fn validate_length(label: &str, value: &str, min: usize, max: usize) -> Result<(), String> {
    let len = value.chars().count();
    if len < min {
        return Err(format!("{label} must be at least {min} characters long!"));
    }
    if len > max {
        return Err(format!("{label} must be at most {max} characters long!"));
    }
    Ok(())
}

pub fn validate_required(label: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{label} is required"));
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), String> {
    validate_length("Username", username, 3, 20)
}

/// 教师用户名：3..15 位，仅字母数字下划线，且以小写字母开头
pub fn validate_teacher_username(username: &str) -> Result<(), String> {
    validate_length("Username", username, 3, 15)?;
    if !TEACHER_USERNAME_RE.is_match(username) {
        return Err("Username can contain any of alphabets, digits & `_`".to_string());
    }
    if !username.starts_with(|c: char| c.is_ascii_lowercase()) {
        return Err("Username must begin with an alphabet".to_string());
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), String> {
    if !EMAIL_RE.is_match(email) {
        return Err("Invalid email address".to_string());
    }
    Ok(())
}

/// 空字符串视为未填写
pub fn validate_optional_email(email: Option<&str>) -> Result<(), String> {
    match email {
        Some(e) if !e.is_empty() => validate_email(e),
        _ => Ok(()),
    }
}

pub fn validate_optional_phone(phone: Option<&str>) -> Result<(), String> {
    match phone {
        Some(p) if !p.is_empty() && !PHONE_RE.is_match(p) => {
            Err("Please enter a valid phone number".to_string())
        }
        _ => Ok(()),
    }
}

pub fn validate_blood_group(group: Option<&str>) -> Result<(), String> {
    match group {
        Some(g) if !g.is_empty() && !BLOOD_GROUPS.contains(&g) => {
            Err(format!("Blood group must be one of: {}", BLOOD_GROUPS.join(", ")))
        }
        _ => Ok(()),
    }
}

/// 密码策略：至少 6 位，包含字母、数字与特殊字符
pub fn validate_password(password: &str) -> Result<(), String> {
    let mut errors = Vec::new();

    if password.chars().count() < 6 {
        errors.push("Password must be at least 6 characters long!");
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        errors.push("Contain at least one letter.");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Contain at least one number.");
    }
    if password.chars().all(|c| c.is_ascii_alphanumeric()) {
        errors.push("Contain at least one special character.");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join(" "))
    }
}

/// 严格的 `HH:MM`，小时 00..23
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime, String> {
    if value.len() != 5 {
        return Err("Please enter a valid time".to_string());
    }
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| "Please enter a valid time".to_string())
}

/// 空白字符串归一为 None
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 外键必须为正数
pub fn validate_positive_id(id: i64, message: &str) -> Result<(), String> {
    if id < 1 {
        return Err(message.to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teacher_username_rules() {
        assert!(validate_teacher_username("mr_smith1").is_ok());
        assert!(validate_teacher_username("ab").is_err());
        assert!(validate_teacher_username("a_very_long_name_x").is_err());
        assert_eq!(
            validate_teacher_username("Smith").unwrap_err(),
            "Username must begin with an alphabet"
        );
        assert_eq!(
            validate_teacher_username("mr-smith").unwrap_err(),
            "Username can contain any of alphabets, digits & `_`"
        );
    }

    #[test]
    fn test_username_length_boundaries() {
        assert!(validate_username("abc").is_ok());
        assert!(validate_username(&"a".repeat(20)).is_ok());
        assert!(validate_username(&"a".repeat(21)).is_err());
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("abc12!").is_ok());
        let err = validate_password("abc123").unwrap_err();
        assert!(err.contains("special character"));
        let err = validate_password("a1!").unwrap_err();
        assert!(err.contains("at least 6 characters"));
        let err = validate_password("!!!!!!").unwrap_err();
        assert!(err.contains("letter") && err.contains("number"));
    }

    #[test]
    fn test_optional_fields() {
        assert!(validate_optional_email(Some("")).is_ok());
        assert!(validate_optional_email(None).is_ok());
        assert!(validate_optional_email(Some("not-an-email")).is_err());
        assert!(validate_optional_email(Some("t@school.edu")).is_ok());
        assert!(validate_blood_group(Some("AB -ve")).is_ok());
        assert!(validate_blood_group(Some("C +ve")).is_err());
        assert!(validate_optional_phone(Some("+44 7700 900123")).is_ok());
        assert!(validate_optional_phone(Some("call me")).is_err());
    }

    #[test]
    fn test_time_of_day() {
        assert!(parse_time_of_day("08:30").is_ok());
        assert!(parse_time_of_day("23:59").is_ok());
        assert!(parse_time_of_day("8:30").is_err());
        assert!(parse_time_of_day("08:60").is_err());
        assert!(parse_time_of_day("24:00").is_err());
        assert!(parse_time_of_day("29:30").is_err());
        assert!(parse_time_of_day("0830").is_err());
        assert_eq!(
            parse_time_of_day("07:05").unwrap(),
            NaiveTime::from_hms_opt(7, 5, 0).unwrap()
        );
    }

    #[test]
    fn test_field_errors_accumulate() {
        let mut errors = FieldErrors::new();
        errors.check("title", validate_length("Title", "ab", 3, 20));
        errors.check("lesson_id", validate_positive_id(0, "Please select a lesson"));
        errors.check("name", Ok(()));
        assert_eq!(
            errors.get("title").unwrap(),
            ["Title must be at least 3 characters long!"]
        );
        assert_eq!(errors.get("lesson_id").unwrap(), ["Please select a lesson"]);
        assert!(errors.get("name").is_none());
        assert!(errors.finish().is_err());
    }
}
