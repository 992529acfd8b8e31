use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireRole};
use crate::models::attendance::requests::AttendanceRequest;
use crate::policy::{ListParams, Resource, allowed_roles, mutating_roles};
use crate::services::AttendanceService;

const PAGE: &str = "/list/attendance";

// 懒加载的全局 AttendanceService 实例
static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);

pub async fn list_attendance(
    req: HttpRequest,
    query: web::Query<ListParams>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.list_attendance(&req, query.into_inner()).await
}

pub async fn create_attendance(
    req: HttpRequest,
    attendance_data: web::Json<AttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.create_attendance(&req, attendance_data.into_inner()).await
}

pub async fn update_attendance(
    req: HttpRequest,
    path: web::Path<i64>,
    attendance_data: web::Json<AttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .update_attendance(&req, path.into_inner(), attendance_data.into_inner())
        .await
}

pub async fn delete_attendance(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.delete_attendance(&req, path.into_inner()).await
}

// 配置路由
pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    let editors = mutating_roles(Resource::Attendance);
    cfg.service(
        web::scope("/api/v1/list/attendance")
            .wrap(RequireRole::new_any(allowed_roles(PAGE)))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_attendance))
                    .route(
                        web::post()
                            .to(create_attendance)
                            .wrap(RequireRole::new_any(editors)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::put()
                            .to(update_attendance)
                            .wrap(RequireRole::new_any(editors)),
                    )
                    .route(
                        web::delete()
                            .to(delete_attendance)
                            .wrap(RequireRole::new_any(editors)),
                    ),
            ),
    );
}
