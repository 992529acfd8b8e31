use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireRole};
use crate::models::exams::requests::ExamRequest;
use crate::policy::{ListParams, Resource, allowed_roles, mutating_roles};
use crate::services::ExamService;

const PAGE: &str = "/list/exams";

// 懒加载的全局 ExamService 实例
static EXAM_SERVICE: Lazy<ExamService> = Lazy::new(ExamService::new_lazy);

pub async fn list_exams(
    req: HttpRequest,
    query: web::Query<ListParams>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.list_exams(&req, query.into_inner()).await
}

pub async fn create_exam(
    req: HttpRequest,
    exam_data: web::Json<ExamRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.create_exam(&req, exam_data.into_inner()).await
}

pub async fn update_exam(
    req: HttpRequest,
    path: web::Path<i64>,
    exam_data: web::Json<ExamRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .update_exam(&req, path.into_inner(), exam_data.into_inner())
        .await
}

pub async fn delete_exam(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.delete_exam(&req, path.into_inner()).await
}

// 配置路由
pub fn configure_exams_routes(cfg: &mut web::ServiceConfig) {
    let editors = mutating_roles(Resource::Exams);
    cfg.service(
        web::scope("/api/v1/list/exams")
            .wrap(RequireRole::new_any(allowed_roles(PAGE)))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_exams))
                    .route(
                        web::post()
                            .to(create_exam)
                            .wrap(RequireRole::new_any(editors)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::put()
                            .to(update_exam)
                            .wrap(RequireRole::new_any(editors)),
                    )
                    .route(
                        web::delete()
                            .to(delete_exam)
                            .wrap(RequireRole::new_any(editors)),
                    ),
            ),
    );
}
