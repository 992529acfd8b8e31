//! 成绩实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub score: i32,
    pub exam_id: Option<i64>,
    pub assignment_id: Option<i64>,
    pub student_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 考试与作业均已删除的成绩返回 None
    pub fn into_result(self) -> Option<crate::models::results::entities::ResultRecord> {
        use crate::models::results::entities::{ResultRecord, ResultSource};

        let source = ResultSource::from_columns(self.exam_id, self.assignment_id)?;
        Some(ResultRecord {
            id: self.id,
            score: self.score,
            source,
            student_id: self.student_id,
        })
    }
}
