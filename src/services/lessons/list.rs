use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LessonService;
use crate::policy::{ListParams, Resource, predicate_for};
use crate::services::common::{list_response, page_request, viewer_from};

const FORM_OPTIONS: &[(&str, Resource)] = &[
    ("subjects", Resource::Subjects),
    ("classes", Resource::Classes),
    ("teachers", Resource::Teachers),
];

pub async fn list_lessons(
    service: &LessonService,
    request: &HttpRequest,
    params: ListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let viewer = viewer_from(request)?;

    let predicate = predicate_for(Resource::Lessons, &viewer);
    let result = storage
        .list_lessons(&predicate, &params.filter(), page_request(&params))
        .await;

    Ok(list_response(&storage, &viewer, Resource::Lessons, result, FORM_OPTIONS).await)
}
