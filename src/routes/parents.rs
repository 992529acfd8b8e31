use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireRole};
use crate::models::parents::requests::ParentRequest;
use crate::policy::{ListParams, Resource, allowed_roles, mutating_roles};
use crate::services::ParentService;

const PAGE: &str = "/list/parents";

// 懒加载的全局 ParentService 实例
static PARENT_SERVICE: Lazy<ParentService> = Lazy::new(ParentService::new_lazy);

pub async fn list_parents(
    req: HttpRequest,
    query: web::Query<ListParams>,
) -> ActixResult<HttpResponse> {
    PARENT_SERVICE.list_parents(&req, query.into_inner()).await
}

pub async fn create_parent(
    req: HttpRequest,
    parent_data: web::Json<ParentRequest>,
) -> ActixResult<HttpResponse> {
    PARENT_SERVICE.create_parent(&req, parent_data.into_inner()).await
}

pub async fn update_parent(
    req: HttpRequest,
    path: web::Path<i64>,
    parent_data: web::Json<ParentRequest>,
) -> ActixResult<HttpResponse> {
    PARENT_SERVICE
        .update_parent(&req, path.into_inner(), parent_data.into_inner())
        .await
}

pub async fn delete_parent(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    PARENT_SERVICE.delete_parent(&req, path.into_inner()).await
}

// 配置路由
pub fn configure_parents_routes(cfg: &mut web::ServiceConfig) {
    let editors = mutating_roles(Resource::Parents);
    cfg.service(
        web::scope("/api/v1/list/parents")
            .wrap(RequireRole::new_any(allowed_roles(PAGE)))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_parents))
                    .route(
                        web::post()
                            .to(create_parent)
                            .wrap(RequireRole::new_any(editors)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::put()
                            .to(update_parent)
                            .wrap(RequireRole::new_any(editors)),
                    )
                    .route(
                        web::delete()
                            .to(delete_parent)
                            .wrap(RequireRole::new_any(editors)),
                    ),
            ),
    );
}
