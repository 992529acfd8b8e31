use serde::{Deserialize, Serialize};

use crate::models::users::entities::NamedRef;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubjectListItem {
    #[serde(flatten)]
    pub subject: Subject,
    pub teachers: Vec<NamedRef>,
}
