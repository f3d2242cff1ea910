//! 文档实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub event_id: Option<i64>,
    pub uploader_id: i64,
    pub template_id: Option<i64>,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub file_name: String,
    pub file_path: String,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::review_events::Entity",
        from = "Column::EventId",
        to = "super::review_events::Column::Id"
    )]
    Event,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UploaderId",
        to = "super::users::Column::Id"
    )]
    Uploader,
    #[sea_orm(
        belongs_to = "super::scoring_templates::Entity",
        from = "Column::TemplateId",
        to = "super::scoring_templates::Column::Id"
    )]
    Template,
    #[sea_orm(has_many = "super::reviews::Entity")]
    Reviews,
}

impl Related<super::review_events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Uploader.def()
    }
}

impl Related<super::scoring_templates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Template.def()
    }
}

impl Related<super::reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_document(self) -> crate::models::documents::entities::Document {
        use crate::models::documents::entities::{Document, DocumentStatus};
        use chrono::{DateTime, Utc};

        Document {
            id: self.id,
            event_id: self.event_id,
            uploader_id: self.uploader_id,
            template_id: self.template_id,
            title: self.title,
            description: self.description,
            file_name: self.file_name,
            file_path: self.file_path,
            status: self
                .status
                .parse::<DocumentStatus>()
                .unwrap_or(DocumentStatus::Pending),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
