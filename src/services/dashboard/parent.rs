use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{DashboardService, latest_announcements};
use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::dashboard::responses::{ChildSchedule, ParentDashboard};
use crate::models::users::entities::NamedRef;
use crate::policy::{Predicate, Viewer, Visibility};
use crate::services::common::{internal_error, viewer_from};
use crate::storage::Storage;

pub async fn parent_dashboard(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let viewer = viewer_from(request)?;

    match build(&storage, &viewer).await {
        Ok(dashboard) => Ok(HttpResponse::Ok().json(ApiResponse::success(dashboard, "Success"))),
        Err(e) => Ok(internal_error("Failed to build parent dashboard", &e)),
    }
}

async fn build(storage: &Arc<dyn Storage>, viewer: &Viewer) -> Result<ParentDashboard> {
    let mut children = Vec::new();
    // 每个孩子一份课表
    for child in storage.list_children(viewer.id).await? {
        let predicate = Predicate {
            visibility: Visibility::ClassEnrolls(child.id),
            include_global: false,
        };
        let schedule = storage.list_schedule(&predicate).await?;
        children.push(ChildSchedule {
            student: NamedRef {
                id: child.id,
                name: child.display_name(),
            },
            schedule,
        });
    }
    let announcements = latest_announcements(storage, viewer).await?;

    Ok(ParentDashboard {
        children,
        announcements,
    })
}
