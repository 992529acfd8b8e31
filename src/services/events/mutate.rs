use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EventService;
use crate::models::events::requests::EventRequest;
use crate::services::common::{Action, action_response, validation_failed};

pub async fn create_event(
    service: &EventService,
    request: &HttpRequest,
    event_data: EventRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    if let Err(errors) = event_data.validate() {
        return Ok(validation_failed(errors));
    }

    let result = storage.create_event(event_data).await.map(|_| true);
    Ok(action_response("Event", Action::Create, result))
}

pub async fn update_event(
    service: &EventService,
    request: &HttpRequest,
    id: i64,
    event_data: EventRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    if let Err(errors) = event_data.validate() {
        return Ok(validation_failed(errors));
    }

    let result = storage
        .update_event(id, event_data)
        .await
        .map(|event| event.is_some());
    Ok(action_response("Event", Action::Update, result))
}

pub async fn delete_event(
    service: &EventService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let result = storage.delete_event(id).await;
    Ok(action_response("Event", Action::Delete, result))
}
