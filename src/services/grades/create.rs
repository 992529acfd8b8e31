use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GradeService;
use crate::models::grades::requests::GradeRequest;
use crate::services::common::{Action, action_response, validation_failed};

pub async fn create_grade(
    service: &GradeService,
    request: &HttpRequest,
    grade_data: GradeRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    if let Err(errors) = grade_data.validate() {
        return Ok(validation_failed(errors));
    }

    let result = storage.create_grade(grade_data).await.map(|grade| {
        info!("Grade level {} created", grade.level);
        true
    });
    Ok(action_response("Grade", Action::Create, result))
}
