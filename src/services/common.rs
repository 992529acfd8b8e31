//! 各资源服务共用的请求处理辅助函数

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde::Serialize;
use tracing::error;

use crate::config::AppConfig;
use crate::errors::{Result, SchoolError};
use crate::middlewares::RequireJWT;
use crate::models::{
    ActionState, ApiResponse, ErrorCode, ListPage, PageRequest, PaginatedResponse,
};
use crate::policy::{ListParams, Predicate, Resource, Viewer, may_mutate, predicate_for};
use crate::storage::Storage;
use crate::utils::FieldErrors;
use crate::utils::password::hash_password;

/// 增删改操作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
    Delete,
}

impl Action {
    fn past_tense(self) -> &'static str {
        match self {
            Action::Create => "created",
            Action::Update => "updated",
            Action::Delete => "deleted",
        }
    }
}

pub(crate) fn storage_from(
    cached: &Option<Arc<dyn Storage>>,
    request: &HttpRequest,
) -> ActixResult<Arc<dyn Storage>> {
    if let Some(storage) = cached {
        return Ok(storage.clone());
    }
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            error!("Storage not found in app data");
            actix_web::error::ErrorInternalServerError(ActionState::GENERIC_FAILURE)
        })
}

pub(crate) fn viewer_from(request: &HttpRequest) -> ActixResult<Viewer> {
    RequireJWT::extract_viewer(request)
        .ok_or_else(|| actix_web::error::ErrorUnauthorized("Authentication required"))
}

/// 页大小取自 `app.items_per_page`
pub(crate) fn page_request(params: &ListParams) -> PageRequest {
    PageRequest::new(params.page(), AppConfig::get().app.items_per_page)
}

/// 校验失败：422 与字段错误表，不访问存储
pub(crate) fn validation_failed(errors: FieldErrors) -> HttpResponse {
    HttpResponse::UnprocessableEntity().json(ApiResponse::error(
        ErrorCode::ValidationFailed,
        errors,
        "Validation failed",
    ))
}

pub(crate) fn forbidden(message: &str) -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error(
        ErrorCode::Forbidden,
        ActionState::failed(message),
        message,
    ))
}

pub(crate) fn not_found(what: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::NotFound,
        format!("{what} not found"),
    ))
}

pub(crate) fn internal_error(context: &str, err: &SchoolError) -> HttpResponse {
    error!("{}: {}", context, err);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        ActionState::GENERIC_FAILURE,
    ))
}

/// 将存储层结果折叠为 `ActionState`
///
/// `Ok(false)` 表示记录不存在；业务规则错误原样返回提示，其余错误只记录日志。
pub(crate) fn action_response(
    resource: &str,
    action: Action,
    result: Result<bool>,
) -> HttpResponse {
    match result {
        Ok(true) => {
            let message = format!("{resource} {} successfully", action.past_tense());
            HttpResponse::Ok().json(ApiResponse::success(ActionState::ok(&message), message))
        }
        Ok(false) => HttpResponse::NotFound().json(ApiResponse::error(
            ErrorCode::NotFound,
            ActionState::generic_failure(),
            ActionState::GENERIC_FAILURE,
        )),
        Err(SchoolError::BusinessRule(message)) => HttpResponse::Conflict().json(
            ApiResponse::error(
                ErrorCode::BusinessRuleViolated,
                ActionState::failed(&message),
                message,
            ),
        ),
        Err(e) => {
            error!("{} {:?} failed: {}", resource, action, e);
            HttpResponse::InternalServerError().json(ApiResponse::error(
                ErrorCode::ActionFailed,
                ActionState::generic_failure(),
                ActionState::GENERIC_FAILURE,
            ))
        }
    }
}

/// 列表响应；调用者可修改该资源时附带表单选项
pub(crate) async fn list_response<T: Serialize>(
    storage: &Arc<dyn Storage>,
    viewer: &Viewer,
    resource: Resource,
    result: Result<PaginatedResponse<T>>,
    options: &[(&'static str, Resource)],
) -> HttpResponse {
    let page = match result {
        Ok(page) => page,
        Err(e) => return internal_error(&format!("Failed to list {resource:?}"), &e),
    };

    let mut listing = ListPage::new(page);
    if may_mutate(resource, viewer.role) {
        for (key, option_resource) in options {
            let predicate = predicate_for(*option_resource, viewer);
            match storage.list_options(*option_resource, &predicate).await {
                Ok(items) => {
                    listing.options.insert(*key, items);
                }
                Err(e) => {
                    return internal_error(&format!("Failed to load {key} options"), &e);
                }
            }
        }
    }

    HttpResponse::Ok().json(ApiResponse::success(listing, "Success"))
}

/// 新建账号的密码哈希；创建模式下校验已保证密码存在
pub(crate) fn hash_new_password(password: Option<&str>) -> Result<String> {
    let password = password.ok_or_else(|| SchoolError::validation("Password is required"))?;
    hash_password(password)
}

/// 非管理员只能操作谓词范围内的记录
pub(crate) async fn within_scope(
    storage: &Arc<dyn Storage>,
    viewer: &Viewer,
    resource: Resource,
    id: i64,
) -> Result<bool> {
    if viewer.is_admin() {
        return Ok(true);
    }
    let predicate: Predicate = predicate_for(resource, viewer);
    storage.is_visible(resource, &predicate, id).await
}

pub(crate) const OWN_LESSONS_ONLY: &str = "You can only manage records of your own lessons";

/// 教师增改考试、作业、考勤时，原记录与目标课程都须由其任教
pub(crate) async fn lesson_access(
    storage: &Arc<dyn Storage>,
    viewer: &Viewer,
    resource: Resource,
    record_id: Option<i64>,
    lesson_id: Option<i64>,
) -> Result<bool> {
    if let Some(id) = record_id
        && !within_scope(storage, viewer, resource, id).await?
    {
        return Ok(false);
    }
    if let Some(lesson_id) = lesson_id
        && !within_scope(storage, viewer, Resource::Lessons, lesson_id).await?
    {
        return Ok(false);
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(resp: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn test_success_message() {
        let resp = action_response("Lesson", Action::Create, Ok(true));
        assert_eq!(resp.status(), 200);
        let json = body_json(resp).await;
        assert_eq!(json["data"]["success"], true);
        assert_eq!(json["data"]["message"], "Lesson created successfully");
    }

    #[actix_web::test]
    async fn test_store_failure_is_generic() {
        let err = SchoolError::database_operation("FOREIGN KEY constraint failed");
        let resp = action_response("Teacher", Action::Delete, Err(err));
        assert_eq!(resp.status(), 500);
        let json = body_json(resp).await;
        assert_eq!(json["data"]["success"], false);
        assert_eq!(json["data"]["message"], "Something went wrong");
    }

    #[actix_web::test]
    async fn test_business_rule_passes_message() {
        let err = SchoolError::business_rule("Class capacity is full");
        let resp = action_response("Student", Action::Create, Err(err));
        assert_eq!(resp.status(), 409);
        let json = body_json(resp).await;
        assert_eq!(json["code"], ErrorCode::BusinessRuleViolated as i32);
        assert_eq!(json["data"]["message"], "Class capacity is full");
    }

    #[actix_web::test]
    async fn test_missing_record_on_update() {
        let resp = action_response("Exam", Action::Update, Ok(false));
        assert_eq!(resp.status(), 404);
    }

    #[actix_web::test]
    async fn test_validation_errors_are_422() {
        let mut errors = FieldErrors::new();
        errors.add("title", "Title is required");
        let resp = validation_failed(errors);
        assert_eq!(resp.status(), 422);
        let json = body_json(resp).await;
        assert_eq!(json["data"]["title"][0], "Title is required");
    }
}
