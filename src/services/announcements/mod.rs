pub mod list;
pub mod mutate;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::announcements::requests::AnnouncementRequest;
use crate::policy::ListParams;
use crate::storage::Storage;

pub struct AnnouncementService {
    storage: Option<Arc<dyn Storage>>,
}

impl AnnouncementService {
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

    // 公告列表
    pub async fn list_announcements(
        &self,
        request: &HttpRequest,
        params: ListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_announcements(self, request, params).await
    }

    pub async fn create_announcement(
        &self,
        request: &HttpRequest,
        announcement_data: AnnouncementRequest,
    ) -> ActixResult<HttpResponse> {
        mutate::create_announcement(self, request, announcement_data).await
    }

    pub async fn update_announcement(
        &self,
        request: &HttpRequest,
        id: i64,
        announcement_data: AnnouncementRequest,
    ) -> ActixResult<HttpResponse> {
        mutate::update_announcement(self, request, id, announcement_data).await
    }

    pub async fn delete_announcement(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        mutate::delete_announcement(self, request, id).await
    }
}
