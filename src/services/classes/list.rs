use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::policy::{ListParams, Resource, predicate_for};
use crate::services::common::{list_response, page_request, viewer_from};

const FORM_OPTIONS: &[(&str, Resource)] = &[
    ("grades", Resource::Grades),
    ("teachers", Resource::Teachers),
];

pub async fn list_classes(
    service: &ClassService,
    request: &HttpRequest,
    params: ListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let viewer = viewer_from(request)?;

    let predicate = predicate_for(Resource::Classes, &viewer);
    let result = storage
        .list_classes(&predicate, &params.filter(), page_request(&params))
        .await;

    Ok(list_response(&storage, &viewer, Resource::Classes, result, FORM_OPTIONS).await)
}
