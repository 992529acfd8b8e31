use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AnnouncementService;
use crate::policy::{ListParams, Resource, predicate_for};
use crate::services::common::{list_response, page_request, viewer_from};

const FORM_OPTIONS: &[(&str, Resource)] = &[
    ("classes", Resource::Classes),
];

pub async fn list_announcements(
    service: &AnnouncementService,
    request: &HttpRequest,
    params: ListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let viewer = viewer_from(request)?;

    let predicate = predicate_for(Resource::Announcements, &viewer);
    let result = storage
        .list_announcements(&predicate, &params.filter(), page_request(&params))
        .await;

    Ok(list_response(&storage, &viewer, Resource::Announcements, result, FORM_OPTIONS).await)
}
