use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AuthService, session_user};
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::services::common::internal_error;

pub async fn handle_me(service: &AuthService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let credential = RequireJWT::extract_credential(request)
        .ok_or_else(|| actix_web::error::ErrorUnauthorized("Authentication required"))?;

    match session_user(&storage, &credential).await {
        Ok(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(user, "Success"))),
        Err(e) => Ok(internal_error("Failed to load session user", &e)),
    }
}
