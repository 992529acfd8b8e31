pub mod list;
pub mod mutate;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::attendance::requests::AttendanceRequest;
use crate::policy::ListParams;
use crate::storage::Storage;

pub struct AttendanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttendanceService {
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

    // 考勤列表
    pub async fn list_attendance(
        &self,
        request: &HttpRequest,
        params: ListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_attendance(self, request, params).await
    }

    pub async fn create_attendance(
        &self,
        request: &HttpRequest,
        attendance_data: AttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        mutate::create_attendance(self, request, attendance_data).await
    }

    pub async fn update_attendance(
        &self,
        request: &HttpRequest,
        id: i64,
        attendance_data: AttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        mutate::update_attendance(self, request, id, attendance_data).await
    }

    pub async fn delete_attendance(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        mutate::delete_attendance(self, request, id).await
    }
}
