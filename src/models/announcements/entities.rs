use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 公告，class_id 为空时全校可见
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub class_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnnouncementListItem {
    #[serde(flatten)]
    pub announcement: Announcement,
    pub class_name: Option<String>,
}
