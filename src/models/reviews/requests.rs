use serde::Deserialize;
use ts_rs::TS;

// 单个维度打分输入
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct DimensionScoreInput {
    pub dimension_id: i64,
    pub score: f64,
    pub comment: Option<String>,
}

// 评审提交请求：必须覆盖文档模板的全部维度
#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct SubmitReviewRequest {
    pub scores: Vec<DimensionScoreInput>,
    pub comment: Option<String>,
}
