pub mod create;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::grades::requests::GradeRequest;
use crate::policy::ListParams;
use crate::storage::Storage;

/// 年级只支持列表与新建
pub struct GradeService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        super::common::storage_from(&self.storage, request)
    }

    pub async fn list_grades(
        &self,
        request: &HttpRequest,
        params: ListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_grades(self, request, params).await
    }

    pub async fn create_grade(
        &self,
        request: &HttpRequest,
        grade_data: GradeRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_grade(self, request, grade_data).await
    }
}
