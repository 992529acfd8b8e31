use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use crate::models::FormMode;
use crate::models::students::requests::StudentRequest;
use crate::services::common::{Action, action_response, hash_new_password, validation_failed};

/// 班级满员时返回 "Class capacity is full"，不写入任何记录
pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
    student_data: StudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let input = match student_data.validate(FormMode::Create) {
        Ok(input) => input,
        Err(errors) => return Ok(validation_failed(errors)),
    };

    let result = match hash_new_password(input.password.as_deref()) {
        Ok(password_hash) => storage
            .create_student(input, password_hash)
            .await
            .map(|student| {
                info!(
                    "Student {} created with ID {} in class {}",
                    student.username, student.id, student.class_id
                );
                true
            }),
        Err(e) => Err(e),
    };
    Ok(action_response("Student", Action::Create, result))
}

pub async fn update_student(
    service: &StudentService,
    request: &HttpRequest,
    id: i64,
    student_data: StudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let input = match student_data.validate(FormMode::Update) {
        Ok(input) => input,
        Err(errors) => return Ok(validation_failed(errors)),
    };

    let result = storage
        .update_student(id, input)
        .await
        .map(|student| student.is_some());
    Ok(action_response("Student", Action::Update, result))
}

pub async fn delete_student(
    service: &StudentService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let result = storage.delete_student(id).await;
    Ok(action_response("Student", Action::Delete, result))
}
