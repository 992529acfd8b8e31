use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireRole};
use crate::models::announcements::requests::AnnouncementRequest;
use crate::policy::{ListParams, Resource, allowed_roles, mutating_roles};
use crate::services::AnnouncementService;

const PAGE: &str = "/list/announcements";

// 懒加载的全局 AnnouncementService 实例
static ANNOUNCEMENT_SERVICE: Lazy<AnnouncementService> = Lazy::new(AnnouncementService::new_lazy);

pub async fn list_announcements(
    req: HttpRequest,
    query: web::Query<ListParams>,
) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE.list_announcements(&req, query.into_inner()).await
}

pub async fn create_announcement(
    req: HttpRequest,
    announcement_data: web::Json<AnnouncementRequest>,
) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE.create_announcement(&req, announcement_data.into_inner()).await
}

pub async fn update_announcement(
    req: HttpRequest,
    path: web::Path<i64>,
    announcement_data: web::Json<AnnouncementRequest>,
) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE
        .update_announcement(&req, path.into_inner(), announcement_data.into_inner())
        .await
}

pub async fn delete_announcement(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE.delete_announcement(&req, path.into_inner()).await
}

// 配置路由
pub fn configure_announcements_routes(cfg: &mut web::ServiceConfig) {
    let editors = mutating_roles(Resource::Announcements);
    cfg.service(
        web::scope("/api/v1/list/announcements")
            .wrap(RequireRole::new_any(allowed_roles(PAGE)))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_announcements))
                    .route(
                        web::post()
                            .to(create_announcement)
                            .wrap(RequireRole::new_any(editors)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::put()
                            .to(update_announcement)
                            .wrap(RequireRole::new_any(editors)),
                    )
                    .route(
                        web::delete()
                            .to(delete_announcement)
                            .wrap(RequireRole::new_any(editors)),
                    ),
            ),
    );
}
