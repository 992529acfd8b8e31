use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ParentService;
use crate::models::FormMode;
use crate::models::parents::requests::ParentRequest;
use crate::services::common::{Action, action_response, hash_new_password, validation_failed};

pub async fn create_parent(
    service: &ParentService,
    request: &HttpRequest,
    parent_data: ParentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let input = match parent_data.validate(FormMode::Create) {
        Ok(input) => input,
        Err(errors) => return Ok(validation_failed(errors)),
    };

    let result = match hash_new_password(input.password.as_deref()) {
        Ok(password_hash) => storage
            .create_parent(input, password_hash)
            .await
            .map(|parent| {
                info!("Parent {} created with ID {}", parent.username, parent.id);
                true
            }),
        Err(e) => Err(e),
    };
    Ok(action_response("Parent", Action::Create, result))
}

pub async fn update_parent(
    service: &ParentService,
    request: &HttpRequest,
    id: i64,
    parent_data: ParentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let input = match parent_data.validate(FormMode::Update) {
        Ok(input) => input,
        Err(errors) => return Ok(validation_failed(errors)),
    };

    let result = storage
        .update_parent(id, input)
        .await
        .map(|parent| parent.is_some());
    Ok(action_response("Parent", Action::Update, result))
}

pub async fn delete_parent(
    service: &ParentService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let result = storage.delete_parent(id).await;
    Ok(action_response("Parent", Action::Delete, result))
}
