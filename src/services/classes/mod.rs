pub mod list;
pub mod mutate;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::classes::requests::ClassRequest;
use crate::policy::ListParams;
use crate::storage::Storage;

pub struct ClassService {
    storage: Option<Arc<dyn Storage>>,
}

impl ClassService {
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

    // 班级列表
    pub async fn list_classes(
        &self,
        request: &HttpRequest,
        params: ListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_classes(self, request, params).await
    }

    pub async fn create_class(
        &self,
        request: &HttpRequest,
        class_data: ClassRequest,
    ) -> ActixResult<HttpResponse> {
        mutate::create_class(self, request, class_data).await
    }

    pub async fn update_class(
        &self,
        request: &HttpRequest,
        id: i64,
        class_data: ClassRequest,
    ) -> ActixResult<HttpResponse> {
        mutate::update_class(self, request, id, class_data).await
    }

    pub async fn delete_class(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        mutate::delete_class(self, request, id).await
    }
}
