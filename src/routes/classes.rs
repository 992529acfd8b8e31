use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireRole};
use crate::models::classes::requests::ClassRequest;
use crate::policy::{ListParams, Resource, allowed_roles, mutating_roles};
use crate::services::ClassService;

const PAGE: &str = "/list/classes";

// 懒加载的全局 ClassService 实例
static CLASS_SERVICE: Lazy<ClassService> = Lazy::new(ClassService::new_lazy);

pub async fn list_classes(
    req: HttpRequest,
    query: web::Query<ListParams>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_classes(&req, query.into_inner()).await
}

pub async fn create_class(
    req: HttpRequest,
    class_data: web::Json<ClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.create_class(&req, class_data.into_inner()).await
}

pub async fn update_class(
    req: HttpRequest,
    path: web::Path<i64>,
    class_data: web::Json<ClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .update_class(&req, path.into_inner(), class_data.into_inner())
        .await
}

pub async fn delete_class(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.delete_class(&req, path.into_inner()).await
}

// 配置路由
pub fn configure_classes_routes(cfg: &mut web::ServiceConfig) {
    let editors = mutating_roles(Resource::Classes);
    cfg.service(
        web::scope("/api/v1/list/classes")
            .wrap(RequireRole::new_any(allowed_roles(PAGE)))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_classes))
                    .route(
                        web::post()
                            .to(create_class)
                            .wrap(RequireRole::new_any(editors)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::put()
                            .to(update_class)
                            .wrap(RequireRole::new_any(editors)),
                    )
                    .route(
                        web::delete()
                            .to(delete_class)
                            .wrap(RequireRole::new_any(editors)),
                    ),
            ),
    );
}
