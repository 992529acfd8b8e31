use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireRole};
use crate::models::assignments::requests::AssignmentRequest;
use crate::policy::{ListParams, Resource, allowed_roles, mutating_roles};
use crate::services::AssignmentService;

const PAGE: &str = "/list/assignments";

// 懒加载的全局 AssignmentService 实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

pub async fn list_assignments(
    req: HttpRequest,
    query: web::Query<ListParams>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.list_assignments(&req, query.into_inner()).await
}

pub async fn create_assignment(
    req: HttpRequest,
    assignment_data: web::Json<AssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.create_assignment(&req, assignment_data.into_inner()).await
}

pub async fn update_assignment(
    req: HttpRequest,
    path: web::Path<i64>,
    assignment_data: web::Json<AssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .update_assignment(&req, path.into_inner(), assignment_data.into_inner())
        .await
}

pub async fn delete_assignment(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.delete_assignment(&req, path.into_inner()).await
}

// 配置路由
pub fn configure_assignments_routes(cfg: &mut web::ServiceConfig) {
    let editors = mutating_roles(Resource::Assignments);
    cfg.service(
        web::scope("/api/v1/list/assignments")
            .wrap(RequireRole::new_any(allowed_roles(PAGE)))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_assignments))
                    .route(
                        web::post()
                            .to(create_assignment)
                            .wrap(RequireRole::new_any(editors)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::put()
                            .to(update_assignment)
                            .wrap(RequireRole::new_any(editors)),
                    )
                    .route(
                        web::delete()
                            .to(delete_assignment)
                            .wrap(RequireRole::new_any(editors)),
                    ),
            ),
    );
}
