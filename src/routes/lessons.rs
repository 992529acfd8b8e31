use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireRole};
use crate::models::lessons::requests::LessonRequest;
use crate::policy::{ListParams, Resource, allowed_roles, mutating_roles};
use crate::services::LessonService;

const PAGE: &str = "/list/lessons";

// 懒加载的全局 LessonService 实例
static LESSON_SERVICE: Lazy<LessonService> = Lazy::new(LessonService::new_lazy);

pub async fn list_lessons(
    req: HttpRequest,
    query: web::Query<ListParams>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.list_lessons(&req, query.into_inner()).await
}

pub async fn create_lesson(
    req: HttpRequest,
    lesson_data: web::Json<LessonRequest>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.create_lesson(&req, lesson_data.into_inner()).await
}

pub async fn update_lesson(
    req: HttpRequest,
    path: web::Path<i64>,
    lesson_data: web::Json<LessonRequest>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE
        .update_lesson(&req, path.into_inner(), lesson_data.into_inner())
        .await
}

pub async fn delete_lesson(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.delete_lesson(&req, path.into_inner()).await
}

// 配置路由
pub fn configure_lessons_routes(cfg: &mut web::ServiceConfig) {
    let editors = mutating_roles(Resource::Lessons);
    cfg.service(
        web::scope("/api/v1/list/lessons")
            .wrap(RequireRole::new_any(allowed_roles(PAGE)))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_lessons))
                    .route(
                        web::post()
                            .to(create_lesson)
                            .wrap(RequireRole::new_any(editors)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::put()
                            .to(update_lesson)
                            .wrap(RequireRole::new_any(editors)),
                    )
                    .route(
                        web::delete()
                            .to(delete_lesson)
                            .wrap(RequireRole::new_any(editors)),
                    ),
            ),
    );
}
