//! 年级存储操作

use sea_orm::{ActiveModelTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use super::{SeaOrmStorage, scope};
use crate::entity::grades;
use crate::entity::prelude::*;
use crate::errors::{Result, SchoolError};
use crate::models::grades::{entities::Grade, requests::GradeRequest};
use crate::models::{PageRequest, PaginatedResponse};
use crate::policy::Predicate;

impl SeaOrmStorage {
    pub async fn list_grades_impl(
        &self,
        predicate: &Predicate,
        page: PageRequest,
    ) -> Result<PaginatedResponse<Grade>> {
        let select = Grades::find()
            .filter(scope::flat_condition(predicate))
            .order_by_asc(grades::Column::Level);
        let (models, pagination) = self.fetch_page(select, page, "年级").await?;

        Ok(PaginatedResponse {
            items: models.into_iter().map(|m| m.into_grade()).collect(),
            pagination,
        })
    }

    pub async fn create_grade_impl(&self, req: GradeRequest) -> Result<Grade> {
        let model = GradeActiveModel {
            level: Set(req.level),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| SchoolError::database_operation(format!("创建年级失败: {e}")))?;

        Ok(model.into_grade())
    }
}
