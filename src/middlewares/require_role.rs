/*!
 * 基于角色的访问控制中间件
 *
 * 此中间件必须在 RequireJWT 中间件之后使用，用于按路径前缀限定可访问的角色。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App};
 * use crate::middlewares::{RequireJWT, RequireRole};
 * use crate::models::users::entities::Role;
 *
 * App::new().service(
 *     web::scope("/api/v1/list/subjects")
 *         .wrap(RequireRole::new(Role::Admin))  // 再验证角色
 *         .wrap(RequireJWT)                     // 先验证JWT
 *         .route("", web::get().to(list_subjects)),
 * )
 * ```
 *
 * 或者允许多个角色：
 *
 * ```rust,ignore
 * .wrap(RequireRole::new_any(&[Role::Admin, Role::Teacher]))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use super::create_error_response;
use crate::models::{ErrorCode, users::entities::Role};
use crate::policy::Viewer;

#[derive(Clone)]
pub struct RequireRole {
    allowed_roles: Vec<Role>,
}

impl RequireRole {
    /// 仅允许单一角色
    pub fn new(role: Role) -> Self {
        Self {
            allowed_roles: vec![role],
        }
    }

    /// 允许任一角色
    pub fn new_any(roles: &[Role]) -> Self {
        Self {
            allowed_roles: roles.to_vec(),
        }
    }

    pub fn allows(&self, role: Role) -> bool {
        self.allowed_roles.contains(&role)
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            rule: self.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    rule: RequireRole,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
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
        let rule = self.rule.clone();

        Box::pin(async move {
            let viewer = req.extensions().get::<Viewer>().copied();

            match viewer {
                Some(viewer) if rule.allows(viewer.role) => {
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Some(viewer) => {
                    info!(
                        "Access denied for user {} (role: {}) on {}. Allowed roles: {:?}",
                        viewer.id,
                        viewer.role,
                        req.path(),
                        rule.allowed_roles
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::FORBIDDEN,
                            ErrorCode::Forbidden,
                            "Access denied.",
                        )
                        .map_into_right_body(),
                    ))
                }
                None => {
                    info!(
                        "Role check failed: no viewer found in request. Make sure RequireJWT middleware is applied first."
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Authentication required",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, test, web};

    // 用 wrap_fn 模拟认证中间件写入的扩展
    async fn call_as(role: Option<Role>, rule: RequireRole) -> StatusCode {
        let app = test::init_service(
            App::new().service(
                web::resource("/guarded")
                    .wrap(rule)
                    .wrap_fn(move |req, srv| {
                        if let Some(role) = role {
                            req.extensions_mut().insert(Viewer::new(1, role));
                        }
                        srv.call(req)
                    })
                    .route(web::get().to(|| async { HttpResponse::Ok().finish() })),
            ),
        )
        .await;
        let req = test::TestRequest::get().uri("/guarded").to_request();
        test::call_service(&app, req).await.status()
    }

    #[actix_web::test]
    async fn test_allowed_role_passes() {
        let rule = RequireRole::new_any(&[Role::Admin, Role::Teacher]);
        assert_eq!(call_as(Some(Role::Teacher), rule).await, StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_other_role_is_forbidden() {
        let rule = RequireRole::new(Role::Admin);
        assert_eq!(call_as(Some(Role::Parent), rule).await, StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_missing_viewer_is_unauthorized() {
        let rule = RequireRole::new(Role::Admin);
        assert_eq!(call_as(None, rule).await, StatusCode::UNAUTHORIZED);
    }
}
