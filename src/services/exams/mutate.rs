use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExamService;
use crate::models::exams::requests::ExamRequest;
use crate::policy::Resource;
use crate::services::common::{
    Action, OWN_LESSONS_ONLY, action_response, forbidden, lesson_access, validation_failed,
    viewer_from,
};

pub async fn create_exam(
    service: &ExamService,
    request: &HttpRequest,
    exam_data: ExamRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let viewer = viewer_from(request)?;
    if let Err(errors) = exam_data.validate() {
        return Ok(validation_failed(errors));
    }

    let lesson_id = Some(exam_data.lesson_id);
    match lesson_access(&storage, &viewer, Resource::Exams, None, lesson_id).await {
        Ok(true) => {}
        Ok(false) => return Ok(forbidden(OWN_LESSONS_ONLY)),
        Err(e) => return Ok(action_response("Exam", Action::Create, Err(e))),
    }

    let result = storage.create_exam(exam_data).await.map(|_| true);
    Ok(action_response("Exam", Action::Create, result))
}

pub async fn update_exam(
    service: &ExamService,
    request: &HttpRequest,
    id: i64,
    exam_data: ExamRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let viewer = viewer_from(request)?;
    if let Err(errors) = exam_data.validate() {
        return Ok(validation_failed(errors));
    }

    let lesson_id = Some(exam_data.lesson_id);
    match lesson_access(&storage, &viewer, Resource::Exams, Some(id), lesson_id).await {
        Ok(true) => {}
        Ok(false) => return Ok(forbidden(OWN_LESSONS_ONLY)),
        Err(e) => return Ok(action_response("Exam", Action::Update, Err(e))),
    }

    let result = storage
        .update_exam(id, exam_data)
        .await
        .map(|record| record.is_some());
    Ok(action_response("Exam", Action::Update, result))
}

pub async fn delete_exam(
    service: &ExamService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let viewer = viewer_from(request)?;

    match lesson_access(&storage, &viewer, Resource::Exams, Some(id), None).await {
        Ok(true) => {}
        Ok(false) => return Ok(forbidden(OWN_LESSONS_ONLY)),
        Err(e) => return Ok(action_response("Exam", Action::Delete, Err(e))),
    }

    let result = storage.delete_exam(id).await;
    Ok(action_response("Exam", Action::Delete, result))
}
