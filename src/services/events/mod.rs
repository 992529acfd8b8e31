pub mod list;
pub mod mutate;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::events::requests::EventRequest;
use crate::policy::ListParams;
use crate::storage::Storage;

pub struct EventService {
    storage: Option<Arc<dyn Storage>>,
}

impl EventService {
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

    // 活动列表
    pub async fn list_events(
        &self,
        request: &HttpRequest,
        params: ListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_events(self, request, params).await
    }

    pub async fn create_event(
        &self,
        request: &HttpRequest,
        event_data: EventRequest,
    ) -> ActixResult<HttpResponse> {
        mutate::create_event(self, request, event_data).await
    }

    pub async fn update_event(
        &self,
        request: &HttpRequest,
        id: i64,
        event_data: EventRequest,
    ) -> ActixResult<HttpResponse> {
        mutate::update_event(self, request, id, event_data).await
    }

    pub async fn delete_event(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        mutate::delete_event(self, request, id).await
    }
}
