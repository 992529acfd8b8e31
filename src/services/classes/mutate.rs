use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::classes::requests::ClassRequest;
use crate::services::common::{Action, action_response, validation_failed};

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    class_data: ClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    if let Err(errors) = class_data.validate() {
        return Ok(validation_failed(errors));
    }

    let result = storage.create_class(class_data).await.map(|_| true);
    Ok(action_response("Class", Action::Create, result))
}

pub async fn update_class(
    service: &ClassService,
    request: &HttpRequest,
    id: i64,
    class_data: ClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    if let Err(errors) = class_data.validate() {
        return Ok(validation_failed(errors));
    }

    let result = storage
        .update_class(id, class_data)
        .await
        .map(|class| class.is_some());
    Ok(action_response("Class", Action::Update, result))
}

pub async fn delete_class(
    service: &ClassService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let result = storage.delete_class(id).await;
    Ok(action_response("Class", Action::Delete, result))
}
