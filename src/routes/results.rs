use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireRole};
use crate::models::results::requests::ResultRequest;
use crate::policy::{ListParams, Resource, allowed_roles, mutating_roles};
use crate::services::ResultService;

const PAGE: &str = "/list/results";

// 懒加载的全局 ResultService 实例
static RESULT_SERVICE: Lazy<ResultService> = Lazy::new(ResultService::new_lazy);

pub async fn list_results(
    req: HttpRequest,
    query: web::Query<ListParams>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.list_results(&req, query.into_inner()).await
}

pub async fn create_result(
    req: HttpRequest,
    result_data: web::Json<ResultRequest>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.create_result(&req, result_data.into_inner()).await
}

pub async fn update_result(
    req: HttpRequest,
    path: web::Path<i64>,
    result_data: web::Json<ResultRequest>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE
        .update_result(&req, path.into_inner(), result_data.into_inner())
        .await
}

pub async fn delete_result(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.delete_result(&req, path.into_inner()).await
}

// 配置路由
pub fn configure_results_routes(cfg: &mut web::ServiceConfig) {
    let editors = mutating_roles(Resource::Results);
    cfg.service(
        web::scope("/api/v1/list/results")
            .wrap(RequireRole::new_any(allowed_roles(PAGE)))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_results))
                    .route(
                        web::post()
                            .to(create_result)
                            .wrap(RequireRole::new_any(editors)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::put()
                            .to(update_result)
                            .wrap(RequireRole::new_any(editors)),
                    )
                    .route(
                        web::delete()
                            .to(delete_result)
                            .wrap(RequireRole::new_any(editors)),
                    ),
            ),
    );
}
