use super::entities::ScoringTemplate;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

// 模板列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct TemplateListResponse {
    pub items: Vec<ScoringTemplate>,
    pub pagination: PaginationInfo,
}
