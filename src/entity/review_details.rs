//! 评审明细实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "review_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub review_id: i64,
    pub dimension_id: i64,
    pub score: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::reviews::Entity",
        from = "Column::ReviewId",
        to = "super::reviews::Column::Id"
    )]
    Review,
    #[sea_orm(
        belongs_to = "super::template_dimensions::Entity",
        from = "Column::DimensionId",
        to = "super::template_dimensions::Column::Id"
    )]
    Dimension,
}

impl Related<super::reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Review.def()
    }
}

impl Related<super::template_dimensions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Dimension.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_review_detail(self) -> crate::models::reviews::entities::ReviewDetail {
        crate::models::reviews::entities::ReviewDetail {
            id: self.id,
            review_id: self.review_id,
            dimension_id: self.dimension_id,
            score: self.score,
            comment: self.comment,
        }
    }
}
