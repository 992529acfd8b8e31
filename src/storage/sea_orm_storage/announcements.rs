//! 公告存储操作

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set,
};

use super::{SeaOrmStorage, lookup, scope};
use crate::entity::announcements;
use crate::entity::prelude::*;
use crate::errors::{Result, SchoolError};
use crate::models::announcements::entities::{Announcement, AnnouncementListItem};
use crate::models::announcements::requests::AnnouncementRequest;
use crate::models::{PageRequest, PaginatedResponse};
use crate::policy::{ListFilter, Predicate};

pub(super) fn announcement_condition(predicate: &Predicate) -> Condition {
    scope::scope_condition(
        predicate,
        |v| scope::class_scope(announcements::Column::ClassId, v),
        Some(Condition::all().add(announcements::Column::ClassId.is_null())),
    )
}

fn apply_request(active: &mut AnnouncementActiveModel, req: &AnnouncementRequest) {
    active.title = Set(req.title.trim().to_string());
    active.description = Set(req.description.clone());
    active.date = Set(req.date.timestamp());
    active.class_id = Set(req.class_scope());
}

impl SeaOrmStorage {
    pub async fn list_announcements_impl(
        &self,
        predicate: &Predicate,
        filter: &ListFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<AnnouncementListItem>> {
        let mut condition = Condition::all().add(announcement_condition(predicate));

        if let Some(class_id) = filter.class_id {
            condition = condition.add(announcements::Column::ClassId.eq(class_id));
        }
        if let Some(ref search) = filter.search {
            condition = condition.add(
                Condition::any()
                    .add(scope::contains_ci(announcements::Column::Title, search))
                    .add(announcements::Column::ClassId.in_subquery(scope::classes_named(search))),
            );
        }

        let select = Announcements::find()
            .filter(condition)
            .order_by_desc(announcements::Column::Date)
            .order_by_asc(announcements::Column::Id);
        let (models, pagination) = self.fetch_page(select, page, "公告").await?;

        let class_names =
            lookup::class_names(&self.db, models.iter().filter_map(|a| a.class_id)).await?;

        let items = models
            .into_iter()
            .map(|m| AnnouncementListItem {
                class_name: m.class_id.and_then(|id| class_names.get(&id).cloned()),
                announcement: m.into_announcement(),
            })
            .collect();

        Ok(PaginatedResponse { items, pagination })
    }

    /// 最新的 limit 条可见公告
    pub async fn latest_announcements_impl(
        &self,
        predicate: &Predicate,
        limit: u64,
    ) -> Result<Vec<Announcement>> {
        let models = Announcements::find()
            .filter(announcement_condition(predicate))
            .order_by_desc(announcements::Column::Date)
            .order_by_desc(announcements::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询公告失败: {e}")))?;
        Ok(models.into_iter().map(|m| m.into_announcement()).collect())
    }

    pub async fn create_announcement_impl(&self, req: AnnouncementRequest) -> Result<Announcement> {
        let mut active = <AnnouncementActiveModel as sea_orm::ActiveModelTrait>::default();
        apply_request(&mut active, &req);

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("创建公告失败: {e}")))?;
        Ok(model.into_announcement())
    }

    pub async fn update_announcement_impl(
        &self,
        id: i64,
        req: AnnouncementRequest,
    ) -> Result<Option<Announcement>> {
        let Some(existing) = Announcements::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: AnnouncementActiveModel = existing.into();
        apply_request(&mut active, &req);
        let model = active
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新公告失败: {e}")))?;
        Ok(Some(model.into_announcement()))
    }

    pub async fn delete_announcement_impl(&self, id: i64) -> Result<bool> {
        let result = Announcements::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除公告失败: {e}")))?;
        Ok(result.rows_affected > 0)
    }
}
