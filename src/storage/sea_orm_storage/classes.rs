//! 班级存储操作

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, FromQueryResult, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::{SeaOrmStorage, lookup, scope};
use crate::entity::prelude::*;
use crate::entity::{classes, students};
use crate::errors::{Result, SchoolError};
use crate::models::classes::entities::{Class, ClassListItem};
use crate::models::classes::requests::ClassRequest;
use crate::models::{PageRequest, PaginatedResponse};
use crate::policy::{ListFilter, Predicate, Visibility};

pub(super) fn class_condition(predicate: &Predicate) -> Condition {
    scope::scope_condition(
        predicate,
        |v| match v {
            Visibility::SupervisedOrTaughtBy(t) => Some(
                Condition::any()
                    .add(classes::Column::SupervisorId.eq(t))
                    .add(classes::Column::Id.in_subquery(scope::classes_taught_by(t))),
            ),
            v => scope::class_scope(classes::Column::Id, v),
        },
        None,
    )
}

#[derive(Debug, FromQueryResult)]
struct ClassCount {
    class_id: i64,
    count: i64,
}

fn apply_request(active: &mut ClassActiveModel, req: &ClassRequest) {
    active.name = Set(req.name.trim().to_string());
    active.capacity = Set(req.capacity);
    active.grade_id = Set(req.grade_id);
    active.supervisor_id = Set(Some(req.supervisor_id));
}

impl SeaOrmStorage {
    pub async fn list_classes_impl(
        &self,
        predicate: &Predicate,
        filter: &ListFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<ClassListItem>> {
        let mut condition = Condition::all().add(class_condition(predicate));

        if let Some(supervisor_id) = filter.supervisor_id {
            condition = condition.add(classes::Column::SupervisorId.eq(supervisor_id));
        }
        if let Some(ref search) = filter.search {
            condition = condition.add(scope::contains_ci(classes::Column::Name, search));
        }

        let select = Classes::find()
            .filter(condition)
            .order_by_asc(classes::Column::Id);
        let (models, pagination) = self.fetch_page(select, page, "班级").await?;

        let ids: Vec<i64> = models.iter().map(|c| c.id).collect();
        let counts = self.count_students_in(&ids).await?;
        let grade_levels = lookup::grade_levels(&self.db, models.iter().map(|c| c.grade_id)).await?;
        let supervisors =
            lookup::teacher_names(&self.db, models.iter().filter_map(|c| c.supervisor_id)).await?;

        let items = models
            .into_iter()
            .map(|m| ClassListItem {
                grade_level: grade_levels.get(&m.grade_id).copied(),
                supervisor_name: m.supervisor_id.and_then(|id| supervisors.get(&id).cloned()),
                student_count: counts.get(&m.id).copied().unwrap_or(0),
                class: m.into_class(),
            })
            .collect();

        Ok(PaginatedResponse { items, pagination })
    }

    async fn count_students_in(&self, class_ids: &[i64]) -> Result<HashMap<i64, u64>> {
        if class_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = Students::find()
            .select_only()
            .column_as(students::Column::ClassId, "class_id")
            .column_as(students::Column::Id.count(), "count")
            .filter(students::Column::ClassId.is_in(class_ids.to_vec()))
            .group_by(students::Column::ClassId)
            .into_model::<ClassCount>()
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计班级人数失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|r| (r.class_id, r.count.max(0) as u64))
            .collect())
    }

    pub async fn get_class_impl(&self, id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询班级失败: {e}")))?;
        Ok(result.map(|m| m.into_class()))
    }

    pub async fn create_class_impl(&self, req: ClassRequest) -> Result<Class> {
        let mut active = <ClassActiveModel as sea_orm::ActiveModelTrait>::default();
        apply_request(&mut active, &req);

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("创建班级失败: {e}")))?;
        Ok(model.into_class())
    }

    pub async fn update_class_impl(&self, id: i64, req: ClassRequest) -> Result<Option<Class>> {
        let Some(existing) = Classes::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: ClassActiveModel = existing.into();
        apply_request(&mut active, &req);
        let model = active
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新班级失败: {e}")))?;
        Ok(Some(model.into_class()))
    }

    /// 仍有学生或课程引用时由外键拒绝
    pub async fn delete_class_impl(&self, id: i64) -> Result<bool> {
        let result = Classes::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除班级失败: {e}")))?;
        Ok(result.rows_affected > 0)
    }
}
