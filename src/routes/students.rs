use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireRole};
use crate::models::students::requests::StudentRequest;
use crate::policy::{ListParams, Resource, allowed_roles, mutating_roles};
use crate::services::StudentService;

const PAGE: &str = "/list/students";

// 懒加载的全局 StudentService 实例
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

pub async fn list_students(
    req: HttpRequest,
    query: web::Query<ListParams>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_students(&req, query.into_inner()).await
}

pub async fn get_student(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_student(&req, path.into_inner()).await
}

pub async fn create_student(
    req: HttpRequest,
    student_data: web::Json<StudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.create_student(&req, student_data.into_inner()).await
}

pub async fn update_student(
    req: HttpRequest,
    path: web::Path<i64>,
    student_data: web::Json<StudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .update_student(&req, path.into_inner(), student_data.into_inner())
        .await
}

pub async fn delete_student(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.delete_student(&req, path.into_inner()).await
}

// 配置路由
pub fn configure_students_routes(cfg: &mut web::ServiceConfig) {
    let editors = mutating_roles(Resource::Students);
    cfg.service(
        web::scope("/api/v1/list/students")
            .wrap(RequireRole::new_any(allowed_roles(PAGE)))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_students))
                    .route(
                        web::post()
                            .to(create_student)
                            .wrap(RequireRole::new_any(editors)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_student))
                    .route(
                        web::put()
                            .to(update_student)
                            .wrap(RequireRole::new_any(editors)),
                    )
                    .route(
                        web::delete()
                            .to(delete_student)
                            .wrap(RequireRole::new_any(editors)),
                    ),
            ),
    );
}
