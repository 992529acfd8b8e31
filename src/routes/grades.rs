use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireRole};
use crate::models::grades::requests::GradeRequest;
use crate::policy::{ListParams, allowed_roles};
use crate::services::GradeService;

static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

pub async fn list_grades(
    req: HttpRequest,
    query: web::Query<ListParams>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.list_grades(&req, query.into_inner()).await
}

pub async fn create_grade(
    req: HttpRequest,
    grade_data: web::Json<GradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.create_grade(&req, grade_data.into_inner()).await
}

// 年级仅管理员可见
pub fn configure_grades_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/list/grades")
            .wrap(RequireRole::new_any(allowed_roles("/list/grades")))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_grades))
            .route("", web::post().to(create_grade)),
    );
}
