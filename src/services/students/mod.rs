pub mod detail;
pub mod list;
pub mod mutate;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::students::requests::StudentRequest;
use crate::policy::ListParams;
use crate::storage::Storage;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
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

    // 学生列表
    pub async fn list_students(
        &self,
        request: &HttpRequest,
        params: ListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, request, params).await
    }

    // 学生详情
    pub async fn get_student(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        detail::get_student(self, request, id).await
    }

    pub async fn create_student(
        &self,
        request: &HttpRequest,
        student_data: StudentRequest,
    ) -> ActixResult<HttpResponse> {
        mutate::create_student(self, request, student_data).await
    }

    pub async fn update_student(
        &self,
        request: &HttpRequest,
        id: i64,
        student_data: StudentRequest,
    ) -> ActixResult<HttpResponse> {
        mutate::update_student(self, request, id, student_data).await
    }

    pub async fn delete_student(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        mutate::delete_student(self, request, id).await
    }
}
