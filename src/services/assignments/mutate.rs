use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::assignments::requests::AssignmentRequest;
use crate::policy::Resource;
use crate::services::common::{
    Action, OWN_LESSONS_ONLY, action_response, forbidden, lesson_access, validation_failed,
    viewer_from,
};

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_data: AssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let viewer = viewer_from(request)?;
    if let Err(errors) = assignment_data.validate() {
        return Ok(validation_failed(errors));
    }

    let lesson_id = Some(assignment_data.lesson_id);
    match lesson_access(&storage, &viewer, Resource::Assignments, None, lesson_id).await {
        Ok(true) => {}
        Ok(false) => return Ok(forbidden(OWN_LESSONS_ONLY)),
        Err(e) => return Ok(action_response("Assignment", Action::Create, Err(e))),
    }

    let result = storage.create_assignment(assignment_data).await.map(|_| true);
    Ok(action_response("Assignment", Action::Create, result))
}

pub async fn update_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    id: i64,
    assignment_data: AssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let viewer = viewer_from(request)?;
    if let Err(errors) = assignment_data.validate() {
        return Ok(validation_failed(errors));
    }

    let lesson_id = Some(assignment_data.lesson_id);
    match lesson_access(&storage, &viewer, Resource::Assignments, Some(id), lesson_id).await {
        Ok(true) => {}
        Ok(false) => return Ok(forbidden(OWN_LESSONS_ONLY)),
        Err(e) => return Ok(action_response("Assignment", Action::Update, Err(e))),
    }

    let result = storage
        .update_assignment(id, assignment_data)
        .await
        .map(|record| record.is_some());
    Ok(action_response("Assignment", Action::Update, result))
}

pub async fn delete_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let viewer = viewer_from(request)?;

    match lesson_access(&storage, &viewer, Resource::Assignments, Some(id), None).await {
        Ok(true) => {}
        Ok(false) => return Ok(forbidden(OWN_LESSONS_ONLY)),
        Err(e) => return Ok(action_response("Assignment", Action::Delete, Err(e))),
    }

    let result = storage.delete_assignment(id).await;
    Ok(action_response("Assignment", Action::Delete, result))
}
