use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{DashboardService, events_on, latest_announcements};
use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::dashboard::requests::DashboardQuery;
use crate::models::dashboard::responses::TeacherDashboard;
use crate::policy::{Resource, Viewer, predicate_for};
use crate::services::common::{internal_error, viewer_from};
use crate::storage::Storage;

pub async fn teacher_dashboard(
    service: &DashboardService,
    request: &HttpRequest,
    query: DashboardQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let viewer = viewer_from(request)?;

    match build(&storage, &viewer, &query).await {
        Ok(dashboard) => Ok(HttpResponse::Ok().json(ApiResponse::success(dashboard, "Success"))),
        Err(e) => Ok(internal_error("Failed to build teacher dashboard", &e)),
    }
}

async fn build(
    storage: &Arc<dyn Storage>,
    viewer: &Viewer,
    query: &DashboardQuery,
) -> Result<TeacherDashboard> {
    // 本人任教的课程
    let schedule = storage
        .list_schedule(&predicate_for(Resource::Lessons, viewer))
        .await?;
    let (date, events) = events_on(storage, viewer, query).await?;
    let announcements = latest_announcements(storage, viewer).await?;

    Ok(TeacherDashboard {
        schedule,
        date,
        events,
        announcements,
    })
}
