/// 业务错误码，随 `ApiResponse.code` 返回
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    // 通用请求错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    PayloadTooLarge = 1013,
    ValidationFailed = 1022,
    RateLimitExceeded = 1029,

    // 认证
    AuthFailed = 2000,
    UserDisabled = 2001,

    // 增删改操作
    ActionFailed = 3000,
    BusinessRuleViolated = 3001,

    InternalServerError = 5000,
}
