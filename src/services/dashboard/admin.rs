use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{DashboardService, events_on, latest_announcements};
use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::dashboard::requests::{DashboardQuery, week_start};
use crate::models::dashboard::responses::AdminDashboard;
use crate::policy::Viewer;
use crate::services::common::{internal_error, viewer_from};
use crate::storage::Storage;

pub async fn admin_dashboard(
    service: &DashboardService,
    request: &HttpRequest,
    query: DashboardQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let viewer = viewer_from(request)?;

    match build(&storage, &viewer, &query).await {
        Ok(dashboard) => Ok(HttpResponse::Ok().json(ApiResponse::success(dashboard, "Success"))),
        Err(e) => Ok(internal_error("Failed to build admin dashboard", &e)),
    }
}

async fn build(
    storage: &Arc<dyn Storage>,
    viewer: &Viewer,
    query: &DashboardQuery,
) -> Result<AdminDashboard> {
    let counts = storage.count_users_by_role().await?;
    // 考勤图表固定为本周，不随日历日期变化
    let attendance = storage
        .attendance_week_summary(week_start(chrono::Utc::now().date_naive()))
        .await?;
    let (date, events) = events_on(storage, viewer, query).await?;
    let announcements = latest_announcements(storage, viewer).await?;

    Ok(AdminDashboard {
        counts,
        attendance,
        date,
        events,
        announcements,
    })
}
