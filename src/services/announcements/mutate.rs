use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AnnouncementService;
use crate::models::announcements::requests::AnnouncementRequest;
use crate::services::common::{Action, action_response, validation_failed};

pub async fn create_announcement(
    service: &AnnouncementService,
    request: &HttpRequest,
    announcement_data: AnnouncementRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    if let Err(errors) = announcement_data.validate() {
        return Ok(validation_failed(errors));
    }

    let result = storage.create_announcement(announcement_data).await.map(|_| true);
    Ok(action_response("Announcement", Action::Create, result))
}

pub async fn update_announcement(
    service: &AnnouncementService,
    request: &HttpRequest,
    id: i64,
    announcement_data: AnnouncementRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    if let Err(errors) = announcement_data.validate() {
        return Ok(validation_failed(errors));
    }

    let result = storage
        .update_announcement(id, announcement_data)
        .await
        .map(|announcement| announcement.is_some());
    Ok(action_response("Announcement", Action::Update, result))
}

pub async fn delete_announcement(
    service: &AnnouncementService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let result = storage.delete_announcement(id).await;
    Ok(action_response("Announcement", Action::Delete, result))
}
