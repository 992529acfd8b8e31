pub mod list;
pub mod mutate;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::parents::requests::ParentRequest;
use crate::policy::ListParams;
use crate::storage::Storage;

pub struct ParentService {
    storage: Option<Arc<dyn Storage>>,
}

impl ParentService {
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

    // 家长列表
    pub async fn list_parents(
        &self,
        request: &HttpRequest,
        params: ListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_parents(self, request, params).await
    }

    pub async fn create_parent(
        &self,
        request: &HttpRequest,
        parent_data: ParentRequest,
    ) -> ActixResult<HttpResponse> {
        mutate::create_parent(self, request, parent_data).await
    }

    pub async fn update_parent(
        &self,
        request: &HttpRequest,
        id: i64,
        parent_data: ParentRequest,
    ) -> ActixResult<HttpResponse> {
        mutate::update_parent(self, request, id, parent_data).await
    }

    pub async fn delete_parent(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        mutate::delete_parent(self, request, id).await
    }
}
