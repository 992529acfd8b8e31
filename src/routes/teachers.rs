use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireRole};
use crate::models::teachers::requests::TeacherRequest;
use crate::policy::{ListParams, Resource, allowed_roles, mutating_roles};
use crate::services::TeacherService;

const PAGE: &str = "/list/teachers";

// 懒加载的全局 TeacherService 实例
static TEACHER_SERVICE: Lazy<TeacherService> = Lazy::new(TeacherService::new_lazy);

pub async fn list_teachers(
    req: HttpRequest,
    query: web::Query<ListParams>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.list_teachers(&req, query.into_inner()).await
}

pub async fn get_teacher(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.get_teacher(&req, path.into_inner()).await
}

pub async fn create_teacher(
    req: HttpRequest,
    teacher_data: web::Json<TeacherRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.create_teacher(&req, teacher_data.into_inner()).await
}

pub async fn update_teacher(
    req: HttpRequest,
    path: web::Path<i64>,
    teacher_data: web::Json<TeacherRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .update_teacher(&req, path.into_inner(), teacher_data.into_inner())
        .await
}

pub async fn delete_teacher(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.delete_teacher(&req, path.into_inner()).await
}

// 配置路由
pub fn configure_teachers_routes(cfg: &mut web::ServiceConfig) {
    let editors = mutating_roles(Resource::Teachers);
    cfg.service(
        web::scope("/api/v1/list/teachers")
            .wrap(RequireRole::new_any(allowed_roles(PAGE)))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_teachers))
                    .route(
                        web::post()
                            .to(create_teacher)
                            .wrap(RequireRole::new_any(editors)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_teacher))
                    .route(
                        web::put()
                            .to(update_teacher)
                            .wrap(RequireRole::new_any(editors)),
                    )
                    .route(
                        web::delete()
                            .to(delete_teacher)
                            .wrap(RequireRole::new_any(editors)),
                    ),
            ),
    );
}
