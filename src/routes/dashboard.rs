use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireRole};
use crate::models::dashboard::requests::DashboardQuery;
use crate::policy::allowed_roles;
use crate::services::DashboardService;

static DASHBOARD_SERVICE: Lazy<DashboardService> = Lazy::new(DashboardService::new_lazy);

pub async fn admin_dashboard(
    req: HttpRequest,
    query: web::Query<DashboardQuery>,
) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.admin(&req, query.into_inner()).await
}

pub async fn teacher_dashboard(
    req: HttpRequest,
    query: web::Query<DashboardQuery>,
) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.teacher(&req, query.into_inner()).await
}

pub async fn student_dashboard(
    req: HttpRequest,
    query: web::Query<DashboardQuery>,
) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.student(&req, query.into_inner()).await
}

pub async fn parent_dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.parent(&req).await
}

// 每个角色一个仪表盘
pub fn configure_dashboard_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/admin")
            .wrap(RequireRole::new_any(allowed_roles("/admin")))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(admin_dashboard)),
    )
    .service(
        web::scope("/api/v1/teacher")
            .wrap(RequireRole::new_any(allowed_roles("/teacher")))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(teacher_dashboard)),
    )
    .service(
        web::scope("/api/v1/student")
            .wrap(RequireRole::new_any(allowed_roles("/student")))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(student_dashboard)),
    )
    .service(
        web::scope("/api/v1/parent")
            .wrap(RequireRole::new_any(allowed_roles("/parent")))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(parent_dashboard)),
    );
}
