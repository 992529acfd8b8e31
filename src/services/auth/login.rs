use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{AuthService, session_user};
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{requests::LoginRequest, responses::LoginResponse},
};
use crate::services::common::validation_failed;
use crate::utils::FieldErrors;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

const INVALID_CREDENTIALS: &str = "Username or password is incorrect";

fn auth_failed() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::AuthFailed,
        INVALID_CREDENTIALS,
    ))
}

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let config = service.get_config();

    let username = login_request.username.trim();
    let mut errors = FieldErrors::new();
    if username.is_empty() {
        errors.add("username", "Username is required");
    }
    if login_request.password.is_empty() {
        errors.add("password", "Password is required");
    }
    if let Err(errors) = errors.finish() {
        return Ok(validation_failed(errors));
    }

    // 1. 根据用户名获取凭据
    let credential = match storage.get_credential_by_username(username).await {
        Ok(Some(credential)) => credential,
        Ok(None) => return Ok(auth_failed()),
        Err(e) => {
            error!("Failed to load credential for {}: {}", username, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed",
                )),
            );
        }
    };

    // 2. 验证密码
    if !verify_password(&login_request.password, &credential.password_hash) {
        return Ok(auth_failed());
    }
    if !credential.is_active {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::UserDisabled,
            "User is disabled",
        )));
    }

    // 3. 组装会话信息并签发令牌
    let user = match session_user(&storage, &credential).await {
        Ok(user) => user,
        Err(e) => {
            error!("Failed to load profile for {}: {}", credential.id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed",
                )),
            );
        }
    };

    match JwtUtils::generate_session_token(user.id, user.role, &user.name, &user.picture) {
        Ok(token) => {
            info!("User {} logged in as {}", credential.username, credential.role);
            let cookie = JwtUtils::create_session_cookie(&token);
            let response = LoginResponse {
                access_token: token,
                expires_in: config.jwt.session_expiry,
                user,
            };
            Ok(HttpResponse::Ok()
                .cookie(cookie)
                .json(ApiResponse::success(response, "Login successful")))
        }
        Err(e) => {
            error!("Failed to generate JWT token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to generate token",
                )),
            )
        }
    }
}
