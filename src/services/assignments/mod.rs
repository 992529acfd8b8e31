pub mod list;
pub mod mutate;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::assignments::requests::AssignmentRequest;
use crate::policy::ListParams;
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
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

    // 作业列表
    pub async fn list_assignments(
        &self,
        request: &HttpRequest,
        params: ListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_assignments(self, request, params).await
    }

    pub async fn create_assignment(
        &self,
        request: &HttpRequest,
        assignment_data: AssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        mutate::create_assignment(self, request, assignment_data).await
    }

    pub async fn update_assignment(
        &self,
        request: &HttpRequest,
        id: i64,
        assignment_data: AssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        mutate::update_assignment(self, request, id, assignment_data).await
    }

    pub async fn delete_assignment(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        mutate::delete_assignment(self, request, id).await
    }
}
