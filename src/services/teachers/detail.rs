use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::ApiResponse;
use crate::services::common::{internal_error, not_found};

pub async fn get_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_teacher_detail(id).await {
        Ok(Some(detail)) => Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "Success"))),
        Ok(None) => Ok(not_found("Teacher")),
        Err(e) => Ok(internal_error(&format!("Failed to load teacher {id}"), &e)),
    }
}
