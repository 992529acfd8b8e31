use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{DashboardService, events_on, latest_announcements};
use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::dashboard::requests::DashboardQuery;
use crate::models::dashboard::responses::StudentDashboard;
use crate::models::users::entities::NamedRef;
use crate::policy::{Resource, Viewer, predicate_for};
use crate::services::common::{internal_error, viewer_from};
use crate::storage::Storage;

pub async fn student_dashboard(
    service: &DashboardService,
    request: &HttpRequest,
    query: DashboardQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let viewer = viewer_from(request)?;

    match build(&storage, &viewer, &query).await {
        Ok(dashboard) => Ok(HttpResponse::Ok().json(ApiResponse::success(dashboard, "Success"))),
        Err(e) => Ok(internal_error("Failed to build student dashboard", &e)),
    }
}

async fn build(
    storage: &Arc<dyn Storage>,
    viewer: &Viewer,
    query: &DashboardQuery,
) -> Result<StudentDashboard> {
    let class = match storage.get_student(viewer.id).await? {
        Some(student) => storage
            .get_class(student.class_id)
            .await?
            .map(|class| NamedRef {
                id: class.id,
                name: class.name,
            }),
        None => None,
    };
    let schedule = storage
        .list_schedule(&predicate_for(Resource::Lessons, viewer))
        .await?;
    let (date, events) = events_on(storage, viewer, query).await?;
    let announcements = latest_announcements(storage, viewer).await?;

    Ok(StudentDashboard {
        class,
        schedule,
        date,
        events,
        announcements,
    })
}
