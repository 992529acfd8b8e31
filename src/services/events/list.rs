use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EventService;
use crate::policy::{ListParams, Resource, predicate_for};
use crate::services::common::{list_response, page_request, viewer_from};

const FORM_OPTIONS: &[(&str, Resource)] = &[
    ("classes", Resource::Classes),
];

pub async fn list_events(
    service: &EventService,
    request: &HttpRequest,
    params: ListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let viewer = viewer_from(request)?;

    let predicate = predicate_for(Resource::Events, &viewer);
    let result = storage
        .list_events(&predicate, &params.filter(), page_request(&params))
        .await;

    Ok(list_response(&storage, &viewer, Resource::Events, result, FORM_OPTIONS).await)
}
