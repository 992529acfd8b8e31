//! 考勤存储操作

use chrono::{DateTime, Datelike, Duration, Utc, Weekday};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::lessons::lesson_filters;
use super::{SeaOrmStorage, lookup, scope};
use crate::entity::prelude::*;
use crate::entity::{attendances, to_datetime};
use crate::errors::{Result, SchoolError};
use crate::models::attendance::entities::{Attendance, AttendanceDay, AttendanceListItem};
use crate::models::attendance::requests::AttendanceRequest;
use crate::models::{PageRequest, PaginatedResponse};
use crate::policy::{ListFilter, Predicate, Visibility};

/// 图表展示周一至周六
const CHART_DAYS: [Weekday; 6] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

pub(super) fn attendance_condition(predicate: &Predicate) -> Condition {
    scope::scope_condition(
        predicate,
        |v| match v {
            Visibility::TaughtBy(_) => scope::lesson_scope(attendances::Column::LessonId, v),
            v => scope::student_scope(attendances::Column::StudentId, v),
        },
        None,
    )
}

/// 按星期汇总出勤与缺勤人次，周日不计
pub(super) fn summarize_week(
    rows: impl IntoIterator<Item = (DateTime<Utc>, bool)>,
) -> Vec<AttendanceDay> {
    let mut days: Vec<AttendanceDay> = CHART_DAYS
        .iter()
        .map(|d| AttendanceDay {
            name: d.to_string(),
            present: 0,
            absent: 0,
        })
        .collect();

    for (date, present) in rows {
        let Some(day) = days.get_mut(date.weekday().num_days_from_monday() as usize) else {
            continue;
        };
        if present {
            day.present += 1;
        } else {
            day.absent += 1;
        }
    }
    days
}

fn apply_request(active: &mut AttendanceActiveModel, req: &AttendanceRequest) {
    active.date = Set(req.date.timestamp());
    active.present = Set(req.present);
    active.student_id = Set(req.student_id);
    active.lesson_id = Set(req.lesson_id);
}

impl SeaOrmStorage {
    pub async fn list_attendance_impl(
        &self,
        predicate: &Predicate,
        filter: &ListFilter,
        page: PageRequest,
    ) -> Result<PaginatedResponse<AttendanceListItem>> {
        let mut condition = Condition::all()
            .add(attendance_condition(predicate))
            .add(lesson_filters(attendances::Column::LessonId, filter));

        if let Some(student_id) = filter.student_id {
            condition = condition.add(attendances::Column::StudentId.eq(student_id));
        }
        if let Some(ref search) = filter.search {
            condition = condition
                .add(attendances::Column::StudentId.in_subquery(scope::students_matching(search)));
        }

        let select = Attendances::find()
            .filter(condition)
            .order_by_desc(attendances::Column::Date)
            .order_by_asc(attendances::Column::Id);
        let (models, pagination) = self.fetch_page(select, page, "考勤").await?;

        let students = lookup::student_names(&self.db, models.iter().map(|a| a.student_id)).await?;
        let lessons = lookup::lessons_by_id(&self.db, models.iter().map(|a| a.lesson_id)).await?;

        let items = models
            .into_iter()
            .map(|m| AttendanceListItem {
                student_name: students.get(&m.student_id).cloned(),
                lesson_name: lessons.get(&m.lesson_id).map(|l| l.name.clone()),
                attendance: m.into_attendance(),
            })
            .collect();

        Ok(PaginatedResponse { items, pagination })
    }

    pub async fn create_attendance_impl(&self, req: AttendanceRequest) -> Result<Attendance> {
        let mut active = <AttendanceActiveModel as sea_orm::ActiveModelTrait>::default();
        apply_request(&mut active, &req);

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("创建考勤失败: {e}")))?;
        Ok(model.into_attendance())
    }

    pub async fn update_attendance_impl(
        &self,
        id: i64,
        req: AttendanceRequest,
    ) -> Result<Option<Attendance>> {
        let Some(existing) = Attendances::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: AttendanceActiveModel = existing.into();
        apply_request(&mut active, &req);
        let model = active
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新考勤失败: {e}")))?;
        Ok(Some(model.into_attendance()))
    }

    pub async fn delete_attendance_impl(&self, id: i64) -> Result<bool> {
        let result = Attendances::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除考勤失败: {e}")))?;
        Ok(result.rows_affected > 0)
    }

    /// 自 week_start 起一周内的考勤汇总
    pub async fn attendance_week_summary_impl(
        &self,
        week_start: DateTime<Utc>,
    ) -> Result<Vec<AttendanceDay>> {
        let week_end = week_start + Duration::days(7);
        let rows = Attendances::find()
            .filter(attendances::Column::Date.gte(week_start.timestamp()))
            .filter(attendances::Column::Date.lt(week_end.timestamp()))
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计考勤失败: {e}")))?;

        Ok(summarize_week(
            rows.into_iter().map(|r| (to_datetime(r.date), r.present)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_summarize_week_buckets_by_weekday() {
        // 2025-03-03 是周一
        let monday = Utc.with_ymd_and_hms(2025, 3, 3, 8, 0, 0).unwrap();
        let rows = vec![
            (monday, true),
            (monday, false),
            (monday + Duration::days(2), true),
            (monday + Duration::days(5), false),
            (monday + Duration::days(6), true),
        ];

        let days = summarize_week(rows);
        let names: Vec<&str> = days.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]);
        assert_eq!((days[0].present, days[0].absent), (1, 1));
        assert_eq!((days[2].present, days[2].absent), (1, 0));
        assert_eq!((days[5].present, days[5].absent), (0, 1));
        assert_eq!(days.iter().map(|d| d.present).sum::<u64>(), 2);
    }
}
