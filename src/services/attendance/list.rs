use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::policy::{ListParams, Resource, predicate_for};
use crate::services::common::{list_response, page_request, viewer_from};

const FORM_OPTIONS: &[(&str, Resource)] = &[
    ("students", Resource::Students),
    ("lessons", Resource::Lessons),
];

pub async fn list_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    params: ListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let viewer = viewer_from(request)?;

    let predicate = predicate_for(Resource::Attendance, &viewer);
    let result = storage
        .list_attendance(&predicate, &params.filter(), page_request(&params))
        .await;

    Ok(list_response(&storage, &viewer, Resource::Attendance, result, FORM_OPTIONS).await)
}
