//! 评分模板实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "scoring_templates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::template_dimensions::Entity")]
    TemplateDimensions,
    #[sea_orm(has_many = "super::review_events::Entity")]
    ReviewEvents,
}

impl Related<super::template_dimensions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TemplateDimensions.def()
    }
}

impl Related<super::review_events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReviewEvents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型；维度列表由存储层显式加载后传入
impl Model {
    pub fn into_template(
        self,
        dimensions: Vec<crate::models::templates::entities::Dimension>,
    ) -> crate::models::templates::entities::ScoringTemplate {
        use crate::models::templates::entities::ScoringTemplate;
        use chrono::{DateTime, Utc};

        ScoringTemplate {
            id: self.id,
            name: self.name,
            description: self.description,
            dimensions,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
