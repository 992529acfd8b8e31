use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TeacherService;
use crate::models::FormMode;
use crate::models::teachers::requests::TeacherRequest;
use crate::services::common::{Action, action_response, hash_new_password, validation_failed};

pub async fn create_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    teacher_data: TeacherRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let input = match teacher_data.validate(FormMode::Create) {
        Ok(input) => input,
        Err(errors) => return Ok(validation_failed(errors)),
    };

    let result = match hash_new_password(input.password.as_deref()) {
        Ok(password_hash) => storage
            .create_teacher(input, password_hash)
            .await
            .map(|teacher| {
                info!("Teacher {} created with ID {}", teacher.username, teacher.id);
                true
            }),
        Err(e) => Err(e),
    };
    Ok(action_response("Teacher", Action::Create, result))
}

pub async fn update_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    id: i64,
    teacher_data: TeacherRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    // 更新时忽略密码
    let input = match teacher_data.validate(FormMode::Update) {
        Ok(input) => input,
        Err(errors) => return Ok(validation_failed(errors)),
    };

    let result = storage
        .update_teacher(id, input)
        .await
        .map(|teacher| teacher.is_some());
    Ok(action_response("Teacher", Action::Update, result))
}

pub async fn delete_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let result = storage.delete_teacher(id).await;
    Ok(action_response("Teacher", Action::Delete, result))
}
