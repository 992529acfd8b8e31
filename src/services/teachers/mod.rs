pub mod detail;
pub mod list;
pub mod mutate;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::teachers::requests::TeacherRequest;
use crate::policy::ListParams;
use crate::storage::Storage;

pub struct TeacherService {
    storage: Option<Arc<dyn Storage>>,
}

impl TeacherService {
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

    // 教师列表
    pub async fn list_teachers(
        &self,
        request: &HttpRequest,
        params: ListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_teachers(self, request, params).await
    }

    // 教师详情
    pub async fn get_teacher(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        detail::get_teacher(self, request, id).await
    }

    pub async fn create_teacher(
        &self,
        request: &HttpRequest,
        teacher_data: TeacherRequest,
    ) -> ActixResult<HttpResponse> {
        mutate::create_teacher(self, request, teacher_data).await
    }

    pub async fn update_teacher(
        &self,
        request: &HttpRequest,
        id: i64,
        teacher_data: TeacherRequest,
    ) -> ActixResult<HttpResponse> {
        mutate::update_teacher(self, request, id, teacher_data).await
    }

    pub async fn delete_teacher(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        mutate::delete_teacher(self, request, id).await
    }
}
