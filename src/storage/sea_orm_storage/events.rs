//! 活动存储操作

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::{SeaOrmStorage, lookup, scope};
use crate::entity::events;
use crate::entity::prelude::*;
use crate::errors::{Result, SchoolError};
use crate::models::events::entities::{Event, EventListItem};
use crate::models::events::requests::EventRequest;
use crate::models::{PageRequest, PaginatedResponse};
use crate::policy::{ListFilter, Predicate};

pub(super) fn event_condition(predicate: &Predicate) -> Condition {
    scope::scope_condition(
        predicate,
        |v| scope::class_scope(events::Column::ClassId, v),
        Some(Condition::all().add(events::Column::ClassId.is_null())),
    )
}

fn apply_request(active: &mut EventActiveModel, req: &EventRequest) {
    active.title = Set(req.title.trim().to_string());
    active.description = Set(req.description.clone());
    active.start_date = Set(req.start_date.timestamp());
    active.end_date = Set(req.end_date.timestamp());
    active.class_id = Set(req.class_scope());
}

impl SeaOrmStorage {
    pub async fn list_events_impl(
        &self,
        predicate: &Predicate,
        filter: &ListFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<EventListItem>> {
        let mut condition = Condition::all().add(event_condition(predicate));

        if let Some(class_id) = filter.class_id {
            condition = condition.add(events::Column::ClassId.eq(class_id));
        }
        if let Some(ref search) = filter.search {
            condition = condition.add(
                Condition::any()
                    .add(scope::contains_ci(events::Column::Title, search))
                    .add(events::Column::ClassId.in_subquery(scope::classes_named(search))),
            );
        }

        let select = Events::find()
            .filter(condition)
            .order_by_desc(events::Column::StartDate)
            .order_by_asc(events::Column::Id);
        let (models, pagination) = self.fetch_page(select, page, "活动").await?;

        let class_names =
            lookup::class_names(&self.db, models.iter().filter_map(|e| e.class_id)).await?;

        let items = models
            .into_iter()
            .map(|m| EventListItem {
                class_name: m.class_id.and_then(|id| class_names.get(&id).cloned()),
                event: m.into_event(),
            })
            .collect();

        Ok(PaginatedResponse { items, pagination })
    }

    /// 开始时间落在 [from, to) 的活动
    pub async fn list_events_between_impl(
        &self,
        predicate: &Predicate,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Event>> {
        let models = Events::find()
            .filter(event_condition(predicate))
            .filter(events::Column::StartDate.gte(from.timestamp()))
            .filter(events::Column::StartDate.lt(to.timestamp()))
            .order_by_asc(events::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询活动失败: {e}")))?;
        Ok(models.into_iter().map(|m| m.into_event()).collect())
    }

    pub async fn create_event_impl(&self, req: EventRequest) -> Result<Event> {
        let mut active = <EventActiveModel as sea_orm::ActiveModelTrait>::default();
        apply_request(&mut active, &req);

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("创建活动失败: {e}")))?;
        Ok(model.into_event())
    }

    pub async fn update_event_impl(&self, id: i64, req: EventRequest) -> Result<Option<Event>> {
        let Some(existing) = Events::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: EventActiveModel = existing.into();
        apply_request(&mut active, &req);
        let model = active
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新活动失败: {e}")))?;
        Ok(Some(model.into_event()))
    }

    pub async fn delete_event_impl(&self, id: i64) -> Result<bool> {
        let result = Events::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除活动失败: {e}")))?;
        Ok(result.rows_affected > 0)
    }
}
