use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResultService;
use crate::models::results::requests::ResultRequest;
use crate::services::common::{Action, action_response, validation_failed};

pub async fn create_result(
    service: &ResultService,
    request: &HttpRequest,
    result_data: ResultRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    // 考试与作业二选一，在此处转换为 ResultSource
    let input = match result_data.validate() {
        Ok(input) => input,
        Err(errors) => return Ok(validation_failed(errors)),
    };

    let result = storage.create_result(input).await.map(|_| true);
    Ok(action_response("Result", Action::Create, result))
}

pub async fn update_result(
    service: &ResultService,
    request: &HttpRequest,
    id: i64,
    result_data: ResultRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let input = match result_data.validate() {
        Ok(input) => input,
        Err(errors) => return Ok(validation_failed(errors)),
    };

    let result = storage
        .update_result(id, input)
        .await
        .map(|record| record.is_some());
    Ok(action_response("Result", Action::Update, result))
}

pub async fn delete_result(
    service: &ResultService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let result = storage.delete_result(id).await;
    Ok(action_response("Result", Action::Delete, result))
}
