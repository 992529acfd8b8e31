use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 活动，class_id 为空时全校可见
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub class_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventListItem {
    #[serde(flatten)]
    pub event: Event,
    pub class_name: Option<String>,
}
