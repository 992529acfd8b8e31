use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::subjects::requests::SubjectRequest;
use crate::services::common::{Action, action_response, validation_failed};

pub async fn create_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_data: SubjectRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    if let Err(errors) = subject_data.validate() {
        return Ok(validation_failed(errors));
    }

    let result = storage.create_subject(subject_data).await.map(|_| true);
    Ok(action_response("Subject", Action::Create, result))
}

pub async fn update_subject(
    service: &SubjectService,
    request: &HttpRequest,
    id: i64,
    subject_data: SubjectRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    if let Err(errors) = subject_data.validate() {
        return Ok(validation_failed(errors));
    }

    let result = storage
        .update_subject(id, subject_data)
        .await
        .map(|subject| subject.is_some());
    Ok(action_response("Subject", Action::Update, result))
}

pub async fn delete_subject(
    service: &SubjectService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let result = storage.delete_subject(id).await;
    Ok(action_response("Subject", Action::Delete, result))
}
