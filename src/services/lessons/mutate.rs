use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LessonService;
use crate::models::lessons::requests::LessonRequest;
use crate::services::common::{Action, action_response, validation_failed};

pub async fn create_lesson(
    service: &LessonService,
    request: &HttpRequest,
    lesson_data: LessonRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let day = match lesson_data.validate() {
        Ok(day) => day,
        Err(errors) => return Ok(validation_failed(errors)),
    };

    let result = storage.create_lesson(lesson_data, day).await.map(|_| true);
    Ok(action_response("Lesson", Action::Create, result))
}

pub async fn update_lesson(
    service: &LessonService,
    request: &HttpRequest,
    id: i64,
    lesson_data: LessonRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let day = match lesson_data.validate() {
        Ok(day) => day,
        Err(errors) => return Ok(validation_failed(errors)),
    };

    let result = storage
        .update_lesson(id, lesson_data, day)
        .await
        .map(|lesson| lesson.is_some());
    Ok(action_response("Lesson", Action::Update, result))
}

pub async fn delete_lesson(
    service: &LessonService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let result = storage.delete_lesson(id).await;
    Ok(action_response("Lesson", Action::Delete, result))
}
