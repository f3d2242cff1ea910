use super::entities::Document;
use crate::models::common::PaginationInfo;
use crate::models::reviews::responses::ReviewWithDetails;
use serde::Serialize;
use ts_rs::TS;

// 文档列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct DocumentListResponse {
    pub items: Vec<Document>,
    pub pagination: PaginationInfo,
}

// 单个维度的平均分
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct DimensionAverage {
    pub dimension_id: i64,
    pub name: String,
    pub average: f64,
}

// 文档聚合评分响应
//
// average 在没有已完成评审时为 null（不是 0）；
// per_dimension 是各维度原始分的算术平均，与综合分相互独立。
#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct DocumentScoresResponse {
    pub document_id: i64,
    pub average: Option<f64>,
    pub review_count: i64,
    pub per_dimension: Vec<DimensionAverage>,
}

// 文档详情响应
#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct DocumentDetailResponse {
    pub document: Document,
    pub average_score: Option<f64>,
    pub review_count: i64,
    pub my_review: Option<ReviewWithDetails>,
}
