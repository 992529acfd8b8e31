pub mod list;
pub mod mutate;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::subjects::requests::SubjectRequest;
use crate::policy::ListParams;
use crate::storage::Storage;

pub struct SubjectService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubjectService {
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

    // 科目列表
    pub async fn list_subjects(
        &self,
        request: &HttpRequest,
        params: ListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_subjects(self, request, params).await
    }

    pub async fn create_subject(
        &self,
        request: &HttpRequest,
        subject_data: SubjectRequest,
    ) -> ActixResult<HttpResponse> {
        mutate::create_subject(self, request, subject_data).await
    }

    pub async fn update_subject(
        &self,
        request: &HttpRequest,
        id: i64,
        subject_data: SubjectRequest,
    ) -> ActixResult<HttpResponse> {
        mutate::update_subject(self, request, id, subject_data).await
    }

    pub async fn delete_subject(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        mutate::delete_subject(self, request, id).await
    }
}
