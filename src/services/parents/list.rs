use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ParentService;
use crate::policy::{ListParams, Resource, predicate_for};
use crate::services::common::{list_response, page_request, viewer_from};

pub async fn list_parents(
    service: &ParentService,
    request: &HttpRequest,
    params: ListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let viewer = viewer_from(request)?;

    let predicate = predicate_for(Resource::Parents, &viewer);
    let result = storage
        .list_parents(&predicate, &params.filter(), page_request(&params))
        .await;

    Ok(list_response(&storage, &viewer, Resource::Parents, result, &[]).await)
}
