//! 评审存储操作

use super::SeaOrmStorage;
use crate::entity::documents::{ActiveModel as DocumentActiveModel, Entity as Documents};
use crate::entity::review_details::{
    ActiveModel as DetailActiveModel, Column as DetailColumn, Entity as ReviewDetails,
};
use crate::entity::reviews::{ActiveModel, Column, Entity as Reviews};
use crate::errors::{DocReviewError, Result};
use crate::models::documents::entities::DocumentStatus;
use crate::models::reviews::{
    entities::{Review, ReviewDetail, ReviewStatus},
    requests::DimensionScoreInput,
    responses::ReviewWithDetails,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 获取某评审者对某文档的评审
    pub async fn get_review_impl(
        &self,
        document_id: i64,
        reviewer_id: i64,
    ) -> Result<Option<Review>> {
        let result = Reviews::find()
            .filter(Column::DocumentId.eq(document_id))
            .filter(Column::ReviewerId.eq(reviewer_id))
            .one(&self.db)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("查询评审失败: {e}")))?;

        Ok(result.map(|m| m.into_review()))
    }

    /// 获取评审的维度明细
    pub async fn get_review_details_impl(&self, review_id: i64) -> Result<Vec<ReviewDetail>> {
        let details = ReviewDetails::find()
            .filter(DetailColumn::ReviewId.eq(review_id))
            .order_by_asc(DetailColumn::DimensionId)
            .all(&self.db)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("查询评审明细失败: {e}")))?;

        Ok(details.into_iter().map(|m| m.into_review_detail()).collect())
    }

    /// 列出文档的全部评审及明细
    pub async fn list_reviews_with_details_impl(
        &self,
        document_id: i64,
    ) -> Result<Vec<ReviewWithDetails>> {
        let reviews = Reviews::find()
            .filter(Column::DocumentId.eq(document_id))
            .order_by_asc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("查询评审失败: {e}")))?;

        let review_ids: Vec<i64> = reviews.iter().map(|r| r.id).collect();
        let all_details = if review_ids.is_empty() {
            vec![]
        } else {
            ReviewDetails::find()
                .filter(DetailColumn::ReviewId.is_in(review_ids))
                .order_by_asc(DetailColumn::DimensionId)
                .all(&self.db)
                .await
                .map_err(|e| {
                    DocReviewError::database_operation(format!("查询评审明细失败: {e}"))
                })?
        };

        Ok(reviews
            .into_iter()
            .map(|r| {
                let details = all_details
                    .iter()
                    .filter(|d| d.review_id == r.id)
                    .cloned()
                    .map(|d| d.into_review_detail())
                    .collect();
                ReviewWithDetails {
                    review: r.into_review(),
                    details,
                }
            })
            .collect())
    }

    /// 列出文档的已完成评审及其全部明细（聚合计算用）
    pub async fn list_completed_reviews_with_details_impl(
        &self,
        document_id: i64,
    ) -> Result<(Vec<Review>, Vec<ReviewDetail>)> {
        let reviews = Reviews::find()
            .filter(Column::DocumentId.eq(document_id))
            .filter(Column::Status.eq(ReviewStatus::Completed.to_string()))
            .all(&self.db)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("查询评审失败: {e}")))?;

        let review_ids: Vec<i64> = reviews.iter().map(|r| r.id).collect();
        let details = if review_ids.is_empty() {
            vec![]
        } else {
            ReviewDetails::find()
                .filter(DetailColumn::ReviewId.is_in(review_ids))
                .all(&self.db)
                .await
                .map_err(|e| {
                    DocReviewError::database_operation(format!("查询评审明细失败: {e}"))
                })?
        };

        Ok((
            reviews.into_iter().map(|m| m.into_review()).collect(),
            details.into_iter().map(|m| m.into_review_detail()).collect(),
        ))
    }

    /// 提交/重提评审
    ///
    /// 维度校验已在服务层全部完成，这里只负责持久化。
    /// 单事务内执行：评审行 upsert（(document_id, reviewer_id) 唯一）、
    /// 明细整组删除重建、文档状态 pending → reviewing。
    /// 任一步失败则整体回滚，不会留下空评审行。
    pub async fn submit_review_impl(
        &self,
        document_id: i64,
        reviewer_id: i64,
        composite_score: f64,
        comment: Option<String>,
        details: Vec<DimensionScoreInput>,
    ) -> Result<Review> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DocReviewError::database_operation(format!("开启事务失败: {e}")))?;

        // upsert 评审行：已存在则覆盖（last-write-wins，不保留历史）
        let existing = Reviews::find()
            .filter(Column::DocumentId.eq(document_id))
            .filter(Column::ReviewerId.eq(reviewer_id))
            .one(&txn)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("查询评审失败: {e}")))?;

        let review = match existing {
            Some(model) => {
                let review_id = model.id;
                let update = ActiveModel {
                    id: Set(review_id),
                    score: Set(Some(composite_score)),
                    comment: Set(comment),
                    status: Set(ReviewStatus::Completed.to_string()),
                    updated_at: Set(now),
                    ..Default::default()
                };
                update
                    .update(&txn)
                    .await
                    .map_err(|e| DocReviewError::database_operation(format!("更新评审失败: {e}")))?
            }
            None => {
                let insert = ActiveModel {
                    document_id: Set(document_id),
                    reviewer_id: Set(reviewer_id),
                    score: Set(Some(composite_score)),
                    comment: Set(comment),
                    status: Set(ReviewStatus::Completed.to_string()),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                insert
                    .insert(&txn)
                    .await
                    .map_err(|e| DocReviewError::database_operation(format!("创建评审失败: {e}")))?
            }
        };

        // 明细整组替换，绝不部分更新
        ReviewDetails::delete_many()
            .filter(DetailColumn::ReviewId.eq(review.id))
            .exec(&txn)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("删除旧明细失败: {e}")))?;

        for detail in &details {
            let detail_model = DetailActiveModel {
                review_id: Set(review.id),
                dimension_id: Set(detail.dimension_id),
                score: Set(detail.score),
                comment: Set(detail.comment.clone()),
                ..Default::default()
            };
            detail_model
                .insert(&txn)
                .await
                .map_err(|e| DocReviewError::database_operation(format!("写入明细失败: {e}")))?;
        }

        // 首个评审完成时推进文档状态；状态只向前，不回退
        let document = Documents::find_by_id(document_id)
            .one(&txn)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("查询文档失败: {e}")))?;

        if let Some(doc) = document
            && doc.status == DocumentStatus::Pending.to_string()
        {
            let doc_update = DocumentActiveModel {
                id: Set(document_id),
                status: Set(DocumentStatus::Reviewing.to_string()),
                updated_at: Set(now),
                ..Default::default()
            };
            doc_update
                .update(&txn)
                .await
                .map_err(|e| DocReviewError::database_operation(format!("更新文档状态失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| DocReviewError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(review.into_review())
    }

    /// 列出评审者的全部评审
    pub async fn list_reviews_by_reviewer_impl(&self, reviewer_id: i64) -> Result<Vec<Review>> {
        let reviews = Reviews::find()
            .filter(Column::ReviewerId.eq(reviewer_id))
            .order_by_desc(Column::UpdatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DocReviewError::database_operation(format!("查询评审失败: {e}")))?;

        Ok(reviews.into_iter().map(|m| m.into_review()).collect())
    }
}
