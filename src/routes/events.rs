use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireRole};
use crate::models::events::requests::EventRequest;
use crate::policy::{ListParams, Resource, allowed_roles, mutating_roles};
use crate::services::EventService;

const PAGE: &str = "/list/events";

// 懒加载的全局 EventService 实例
static EVENT_SERVICE: Lazy<EventService> = Lazy::new(EventService::new_lazy);

pub async fn list_events(
    req: HttpRequest,
    query: web::Query<ListParams>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.list_events(&req, query.into_inner()).await
}

pub async fn create_event(
    req: HttpRequest,
    event_data: web::Json<EventRequest>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.create_event(&req, event_data.into_inner()).await
}

pub async fn update_event(
    req: HttpRequest,
    path: web::Path<i64>,
    event_data: web::Json<EventRequest>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE
        .update_event(&req, path.into_inner(), event_data.into_inner())
        .await
}

pub async fn delete_event(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.delete_event(&req, path.into_inner()).await
}

// 配置路由
pub fn configure_events_routes(cfg: &mut web::ServiceConfig) {
    let editors = mutating_roles(Resource::Events);
    cfg.service(
        web::scope("/api/v1/list/events")
            .wrap(RequireRole::new_any(allowed_roles(PAGE)))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_events))
                    .route(
                        web::post()
                            .to(create_event)
                            .wrap(RequireRole::new_any(editors)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::put()
                            .to(update_event)
                            .wrap(RequireRole::new_any(editors)),
                    )
                    .route(
                        web::delete()
                            .to(delete_event)
                            .wrap(RequireRole::new_any(editors)),
                    ),
            ),
    );
}
