use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::{Error, HttpRequest, HttpResponse};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

/// 将查询参数解析失败转换为统一响应
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    debug!("Invalid query string on {}: {err}", req.path());
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        format!("Invalid query parameters: {err}"),
    ));
    InternalError::from_response(err, response).into()
}

/// 将 JSON 请求体解析失败转换为统一响应
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    debug!("Invalid JSON body on {}: {err}", req.path());
    let (code, message) = match &err {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            (ErrorCode::PayloadTooLarge, "Request body is too large".to_string())
        }
        JsonPayloadError::ContentType => (
            ErrorCode::BadRequest,
            "Content-Type must be application/json".to_string(),
        ),
        _ => (ErrorCode::BadRequest, format!("Invalid request body: {err}")),
    };
    let response = match code {
        ErrorCode::PayloadTooLarge => HttpResponse::PayloadTooLarge(),
        _ => HttpResponse::BadRequest(),
    }
    .json(ApiResponse::error_empty(code, message));
    InternalError::from_response(err, response).into()
}
