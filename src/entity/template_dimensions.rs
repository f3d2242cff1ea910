//! 模板维度实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "template_dimensions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub template_id: i64,
    pub name: String,
    pub weight: f64,
    pub order_index: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::scoring_templates::Entity",
        from = "Column::TemplateId",
        to = "super::scoring_templates::Column::Id"
    )]
    Template,
    #[sea_orm(has_many = "super::review_details::Entity")]
    ReviewDetails,
}

impl Related<super::scoring_templates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Template.def()
    }
}

impl Related<super::review_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReviewDetails.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_dimension(self) -> crate::models::templates::entities::Dimension {
        crate::models::templates::entities::Dimension {
            id: self.id,
            template_id: self.template_id,
            name: self.name,
            weight: self.weight,
            order_index: self.order_index,
        }
    }
}
