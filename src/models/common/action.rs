use serde::{Deserialize, Serialize};

/// 增删改操作的结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionState {
    pub success: bool,
    pub message: String,
}

impl ActionState {
    pub const GENERIC_FAILURE: &'static str = "Something went wrong";

    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    /// 存储层失败统一折叠为通用提示
    pub fn generic_failure() -> Self {
        Self::failed(Self::GENERIC_FAILURE)
    }
}

/// 表单提交模式，更新时不要求密码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update,
}
