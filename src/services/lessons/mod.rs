pub mod list;
pub mod mutate;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::lessons::requests::LessonRequest;
use crate::policy::ListParams;
use crate::storage::Storage;

pub struct LessonService {
    storage: Option<Arc<dyn Storage>>,
}

impl LessonService {
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

    // 课程列表
    pub async fn list_lessons(
        &self,
        request: &HttpRequest,
        params: ListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_lessons(self, request, params).await
    }

    pub async fn create_lesson(
        &self,
        request: &HttpRequest,
        lesson_data: LessonRequest,
    ) -> ActixResult<HttpResponse> {
        mutate::create_lesson(self, request, lesson_data).await
    }

    pub async fn update_lesson(
        &self,
        request: &HttpRequest,
        id: i64,
        lesson_data: LessonRequest,
    ) -> ActixResult<HttpResponse> {
        mutate::update_lesson(self, request, id, lesson_data).await
    }

    pub async fn delete_lesson(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        mutate::delete_lesson(self, request, id).await
    }
}
