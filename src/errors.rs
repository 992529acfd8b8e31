//! 统一错误处理模块
//!
//! 使用宏生成错误类型，每个变体带错误代码与类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 生成 enum 定义、`code()`、`error_type()`、`message()` 以及 snake_case 构造函数。
macro_rules! define_school_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum SchoolError {
            $($variant(String),)*
        }

        impl SchoolError {
            /// 错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(SchoolError::$variant(_) => $code,)*
                }
            }

            /// 错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SchoolError::$variant(_) => $type_name,)*
                }
            }

            /// 错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(SchoolError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl SchoolError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SchoolError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_school_errors! {
    Configuration("E001", "Configuration Error"),
    DatabaseConfig("E002", "Database Configuration Error"),
    DatabaseConnection("E003", "Database Connection Error"),
    DatabaseOperation("E004", "Database Operation Error"),
    Io("E005", "IO Error"),
    Validation("E006", "Validation Error"),
    NotFound("E007", "Resource Not Found"),
    Serialization("E008", "Serialization Error"),
    DateParse("E009", "Date Parse Error"),
    Authentication("E010", "Authentication Error"),
    Authorization("E011", "Authorization Error"),
    BusinessRule("E012", "Business Rule Violation"),
}

impl SchoolError {
    /// 彩色输出（开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for SchoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SchoolError {}

impl From<sea_orm::DbErr> for SchoolError {
    fn from(err: sea_orm::DbErr) -> Self {
        SchoolError::DatabaseOperation(err.to_string())
    }
}

impl From<sea_orm::TransactionError<SchoolError>> for SchoolError {
    fn from(err: sea_orm::TransactionError<SchoolError>) -> Self {
        match err {
            sea_orm::TransactionError::Connection(e) => SchoolError::DatabaseOperation(e.to_string()),
            sea_orm::TransactionError::Transaction(e) => e,
        }
    }
}

impl From<std::io::Error> for SchoolError {
    fn from(err: std::io::Error) -> Self {
        SchoolError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SchoolError {
    fn from(err: serde_json::Error) -> Self {
        SchoolError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for SchoolError {
    fn from(err: chrono::ParseError) -> Self {
        SchoolError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SchoolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SchoolError::configuration("x").code(), "E001");
        assert_eq!(SchoolError::validation("x").code(), "E006");
        assert_eq!(SchoolError::authentication("x").code(), "E010");
        assert_eq!(SchoolError::business_rule("x").code(), "E012");
    }

    #[test]
    fn test_error_types_and_message() {
        let err = SchoolError::not_found("Class 7");
        assert_eq!(err.error_type(), "Resource Not Found");
        assert_eq!(err.message(), "Class 7");
    }

    #[test]
    fn test_db_error_conversion() {
        let err: SchoolError = sea_orm::DbErr::Custom("boom".into()).into();
        assert_eq!(err.code(), "E004");
        assert!(err.format_simple().contains("boom"));
    }
}
