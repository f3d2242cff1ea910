use super::entities::{Review, ReviewDetail};
use serde::Serialize;
use ts_rs::TS;

// 评审及其维度明细
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct ReviewWithDetails {
    pub review: Review,
    pub details: Vec<ReviewDetail>,
}

// 文档的全部评审列表
#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct DocumentReviewsResponse {
    pub items: Vec<ReviewWithDetails>,
}
