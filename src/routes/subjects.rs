use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireRole};
use crate::models::subjects::requests::SubjectRequest;
use crate::policy::{ListParams, Resource, allowed_roles, mutating_roles};
use crate::services::SubjectService;

const PAGE: &str = "/list/subjects";

// 懒加载的全局 SubjectService 实例
static SUBJECT_SERVICE: Lazy<SubjectService> = Lazy::new(SubjectService::new_lazy);

pub async fn list_subjects(
    req: HttpRequest,
    query: web::Query<ListParams>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.list_subjects(&req, query.into_inner()).await
}

pub async fn create_subject(
    req: HttpRequest,
    subject_data: web::Json<SubjectRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.create_subject(&req, subject_data.into_inner()).await
}

pub async fn update_subject(
    req: HttpRequest,
    path: web::Path<i64>,
    subject_data: web::Json<SubjectRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .update_subject(&req, path.into_inner(), subject_data.into_inner())
        .await
}

pub async fn delete_subject(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.delete_subject(&req, path.into_inner()).await
}

// 配置路由
pub fn configure_subjects_routes(cfg: &mut web::ServiceConfig) {
    let editors = mutating_roles(Resource::Subjects);
    cfg.service(
        web::scope("/api/v1/list/subjects")
            .wrap(RequireRole::new_any(allowed_roles(PAGE)))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_subjects))
                    .route(
                        web::post()
                            .to(create_subject)
                            .wrap(RequireRole::new_any(editors)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::put()
                            .to(update_subject)
                            .wrap(RequireRole::new_any(editors)),
                    )
                    .route(
                        web::delete()
                            .to(delete_subject)
                            .wrap(RequireRole::new_any(editors)),
                    ),
            ),
    );
}
