pub mod list;
pub mod mutate;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::results::requests::ResultRequest;
use crate::policy::ListParams;
use crate::storage::Storage;

pub struct ResultService {
    storage: Option<Arc<dyn Storage>>,
}

impl ResultService {
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

    // 成绩列表
    pub async fn list_results(
        &self,
        request: &HttpRequest,
        params: ListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_results(self, request, params).await
    }

    pub async fn create_result(
        &self,
        request: &HttpRequest,
        result_data: ResultRequest,
    ) -> ActixResult<HttpResponse> {
        mutate::create_result(self, request, result_data).await
    }

    pub async fn update_result(
        &self,
        request: &HttpRequest,
        id: i64,
        result_data: ResultRequest,
    ) -> ActixResult<HttpResponse> {
        mutate::update_result(self, request, id, result_data).await
    }

    pub async fn delete_result(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        mutate::delete_result(self, request, id).await
    }
}
