//! 各角色仪表盘
//!
//! 日历与公告按调用者的谓词过滤，与列表页保持一致。

pub mod admin;
pub mod parent;
pub mod student;
pub mod teacher;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::announcements::entities::Announcement;
use crate::models::dashboard::requests::{DashboardQuery, day_bounds};
use crate::models::events::entities::Event;
use crate::policy::{Resource, Viewer, predicate_for};
use crate::storage::Storage;

/// 仪表盘展示的公告条数
pub const LATEST_ANNOUNCEMENTS: u64 = 3;

pub struct DashboardService {
    storage: Option<Arc<dyn Storage>>,
}

impl DashboardService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub fn with_storage(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        super::common::storage_from(&self.storage, request)
    }

    pub async fn admin(
        &self,
        request: &HttpRequest,
        query: DashboardQuery,
    ) -> ActixResult<HttpResponse> {
        admin::admin_dashboard(self, request, query).await
    }

    pub async fn teacher(
        &self,
        request: &HttpRequest,
        query: DashboardQuery,
    ) -> ActixResult<HttpResponse> {
        teacher::teacher_dashboard(self, request, query).await
    }

    pub async fn student(
        &self,
        request: &HttpRequest,
        query: DashboardQuery,
    ) -> ActixResult<HttpResponse> {
        student::student_dashboard(self, request, query).await
    }

    pub async fn parent(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        parent::parent_dashboard(self, request).await
    }
}

/// 指定日期内开始的可见活动
pub(crate) async fn events_on(
    storage: &Arc<dyn Storage>,
    viewer: &Viewer,
    query: &DashboardQuery,
) -> Result<(chrono::NaiveDate, Vec<Event>)> {
    let date = query.date_or(chrono::Utc::now().date_naive());
    let (from, to) = day_bounds(date);
    let events = storage
        .list_events_between(&predicate_for(Resource::Events, viewer), from, to)
        .await?;
    Ok((date, events))
}

pub(crate) async fn latest_announcements(
    storage: &Arc<dyn Storage>,
    viewer: &Viewer,
) -> Result<Vec<Announcement>> {
    storage
        .latest_announcements(
            &predicate_for(Resource::Announcements, viewer),
            LATEST_ANNOUNCEMENTS,
        )
        .await
}
