use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::attendance::requests::AttendanceRequest;
use crate::policy::Resource;
use crate::services::common::{
    Action, OWN_LESSONS_ONLY, action_response, forbidden, lesson_access, validation_failed,
    viewer_from,
};

pub async fn create_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    attendance_data: AttendanceRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let viewer = viewer_from(request)?;
    if let Err(errors) = attendance_data.validate() {
        return Ok(validation_failed(errors));
    }

    let lesson_id = Some(attendance_data.lesson_id);
    match lesson_access(&storage, &viewer, Resource::Attendance, None, lesson_id).await {
        Ok(true) => {}
        Ok(false) => return Ok(forbidden(OWN_LESSONS_ONLY)),
        Err(e) => return Ok(action_response("Attendance", Action::Create, Err(e))),
    }

    let result = storage.create_attendance(attendance_data).await.map(|_| true);
    Ok(action_response("Attendance", Action::Create, result))
}

pub async fn update_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    id: i64,
    attendance_data: AttendanceRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let viewer = viewer_from(request)?;
    if let Err(errors) = attendance_data.validate() {
        return Ok(validation_failed(errors));
    }

    let lesson_id = Some(attendance_data.lesson_id);
    match lesson_access(&storage, &viewer, Resource::Attendance, Some(id), lesson_id).await {
        Ok(true) => {}
        Ok(false) => return Ok(forbidden(OWN_LESSONS_ONLY)),
        Err(e) => return Ok(action_response("Attendance", Action::Update, Err(e))),
    }

    let result = storage
        .update_attendance(id, attendance_data)
        .await
        .map(|record| record.is_some());
    Ok(action_response("Attendance", Action::Update, result))
}

pub async fn delete_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let viewer = viewer_from(request)?;

    match lesson_access(&storage, &viewer, Resource::Attendance, Some(id), None).await {
        Ok(true) => {}
        Ok(false) => return Ok(forbidden(OWN_LESSONS_ONLY)),
        Err(e) => return Ok(action_response("Attendance", Action::Delete, Err(e))),
    }

    let result = storage.delete_attendance(id).await;
    Ok(action_response("Attendance", Action::Delete, result))
}
