use std::collections::BTreeMap;

use serde::Serialize;

use super::PaginatedResponse;
use crate::models::users::entities::NamedRef;

/// 列表页响应：分页数据加上表单所需的下拉选项
#[derive(Debug, Serialize)]
pub struct ListPage<T> {
    #[serde(flatten)]
    pub page: PaginatedResponse<T>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<&'static str, Vec<NamedRef>>,
}

impl<T> ListPage<T> {
    pub fn new(page: PaginatedResponse<T>) -> Self {
        Self {
            page,
            options: BTreeMap::new(),
        }
    }
}
