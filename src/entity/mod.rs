//! SeaORM 实体定义
//!
//! 与 models 模块中的业务实体分离。Storage 层使用这些实体读写，
//! 再通过 `into_*` 转换为业务实体。

pub mod prelude;

pub mod admins;
pub mod announcements;
pub mod assignments;
pub mod attendances;
pub mod classes;
pub mod events;
pub mod exams;
pub mod grades;
pub mod lessons;
pub mod parents;
pub mod results;
pub mod students;
pub mod subjects;
pub mod teacher_subjects;
pub mod teachers;
pub mod users;

use chrono::{DateTime, NaiveDate, Utc};

pub(crate) fn to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}

pub(crate) fn to_date(ts: i64) -> NaiveDate {
    to_datetime(ts).date_naive()
}

/// 日期按 UTC 零点存储
pub(crate) fn date_to_timestamp(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}
