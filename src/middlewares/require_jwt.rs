/*!
 * JWT 认证中间件
 *
 * 验证会话令牌，并从存储中重新读取登录凭据，确保只有有效用户才能访问受保护的路由。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App};
 * use crate::middlewares::RequireJWT;
 *
 * App::new().service(
 *     web::scope("/api/v1/list")
 *         .wrap(RequireJWT)
 *         .route("/lessons", web::get().to(list_lessons)),
 * )
 * ```
 *
 * 处理程序中可直接以 `Viewer` 作为提取器，或调用 `RequireJWT::extract_viewer`。
 *
 * ## 认证流程
 *
 * 1. 依次从 `Authorization: Bearer <token>` 与会话 Cookie 中读取令牌
 * 2. 校验签名与过期时间
 * 3. 重新读取凭据，拒绝不存在、已停用或角色不一致的用户
 * 4. 将 `Viewer` 与 `Credential` 写入请求扩展
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error, info};

use super::create_error_response;
use crate::models::ErrorCode;
use crate::models::users::entities::Credential;
use crate::policy::Viewer;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;

#[derive(Clone)]
pub struct RequireJWT;

// 辅助函数：提取并验证会话令牌
async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<Credential, String> {
    let token = JwtUtils::extract_token(req.request())
        .ok_or_else(|| "Missing session token".to_string())?;

    let claims = JwtUtils::verify_token(&token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        "Invalid JWT token".to_string()
    })?;

    let user_id = claims
        .user_id()
        .ok_or_else(|| "Invalid user ID in JWT".to_string())?;

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            error!("Storage not found in app data");
            "Authentication backend unavailable".to_string()
        })?;

    let credential = storage
        .get_credential_by_id(user_id)
        .await
        .map_err(|e| {
            error!("Failed to retrieve credential {}: {}", user_id, e);
            "Failed to retrieve user from storage".to_string()
        })?
        .ok_or_else(|| "User not found".to_string())?;

    if !credential.is_active {
        return Err("User is not active".to_string());
    }
    if claims.role() != Some(credential.role) {
        return Err("Role in token does not match user".to_string());
    }

    Ok(credential)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 预检请求交给 CORS 处理
            if req.method() == actix_web::http::Method::OPTIONS {
                let res = srv.call(req).await?.map_into_left_body();
                return Ok(res);
            }

            match extract_and_validate_jwt(&req).await {
                Ok(credential) => {
                    debug!("JWT authentication successful for ID: {}", credential.id);
                    req.extensions_mut()
                        .insert(Viewer::new(credential.id, credential.role));
                    req.extensions_mut().insert(credential);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取用户信息
impl RequireJWT {
    /// 当前调用者，须在应用了 RequireJWT 的路由中使用
    pub fn extract_viewer(req: &actix_web::HttpRequest) -> Option<Viewer> {
        req.extensions().get::<Viewer>().copied()
    }

    /// 当前调用者的登录凭据
    pub fn extract_credential(req: &actix_web::HttpRequest) -> Option<Credential> {
        req.extensions().get::<Credential>().cloned()
    }
}
