pub mod list;
pub mod mutate;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::exams::requests::ExamRequest;
use crate::policy::ListParams;
use crate::storage::Storage;

pub struct ExamService {
    storage: Option<Arc<dyn Storage>>,
}

impl ExamService {
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

    // 考试列表
    pub async fn list_exams(
        &self,
        request: &HttpRequest,
        params: ListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_exams(self, request, params).await
    }

    pub async fn create_exam(
        &self,
        request: &HttpRequest,
        exam_data: ExamRequest,
    ) -> ActixResult<HttpResponse> {
        mutate::create_exam(self, request, exam_data).await
    }

    pub async fn update_exam(
        &self,
        request: &HttpRequest,
        id: i64,
        exam_data: ExamRequest,
    ) -> ActixResult<HttpResponse> {
        mutate::update_exam(self, request, id, exam_data).await
    }

    pub async fn delete_exam(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        mutate::delete_exam(self, request, id).await
    }
}
