use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::users::entities::{NamedRef, display_name};

// 家长档案
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parent {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: Option<String>,
    pub img: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Parent {
    pub fn display_name(&self) -> String {
        display_name(&self.first_name, Some(&self.last_name))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ParentListItem {
    #[serde(flatten)]
    pub parent: Parent,
    pub students: Vec<NamedRef>,
}
