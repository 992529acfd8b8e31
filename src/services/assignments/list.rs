use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::policy::{ListParams, Resource, predicate_for};
use crate::services::common::{list_response, page_request, viewer_from};

const FORM_OPTIONS: &[(&str, Resource)] = &[
    ("lessons", Resource::Lessons),
];

pub async fn list_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    params: ListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let viewer = viewer_from(request)?;

    let predicate = predicate_for(Resource::Assignments, &viewer);
    let result = storage
        .list_assignments(&predicate, &params.filter(), page_request(&params))
        .await;

    Ok(list_response(&storage, &viewer, Resource::Assignments, result, FORM_OPTIONS).await)
}
