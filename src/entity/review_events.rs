//! 评审活动实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "review_events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub template_id: i64,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub upload_deadline: Option<i64>,
    pub is_active: bool,
    pub created_by: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::scoring_templates::Entity",
        from = "Column::TemplateId",
        to = "super::scoring_templates::Column::Id"
    )]
    Template,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id"
    )]
    Creator,
    #[sea_orm(has_many = "super::documents::Entity")]
    Documents,
    #[sea_orm(has_many = "super::event_teachers::Entity")]
    EventTeachers,
    #[sea_orm(has_many = "super::event_reviewers::Entity")]
    EventReviewers,
}

impl Related<super::scoring_templates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Template.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::documents::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Documents.def()
    }
}

impl Related<super::event_teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventTeachers.def()
    }
}

impl Related<super::event_reviewers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventReviewers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_event(self) -> crate::models::events::entities::ReviewEvent {
        use chrono::{DateTime, Utc};

        crate::models::events::entities::ReviewEvent {
            id: self.id,
            name: self.name,
            description: self.description,
            template_id: self.template_id,
            start_time: self
                .start_time
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
            end_time: self
                .end_time
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
            upload_deadline: self
                .upload_deadline
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
            is_active: self.is_active,
            created_by: self.created_by,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
