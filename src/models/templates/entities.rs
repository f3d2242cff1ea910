use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 评分维度
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Dimension {
    pub id: i64,
    pub template_id: i64,
    pub name: String,
    // 权重，批量编辑时要求总和为 1.0 ± 0.01
    pub weight: f64,
    // 展示顺序，从 0 开始
    pub order_index: i32,
}

// 评分模板
//
// dimensions 始终是按 order_index 升序的完整维度列表，
// 由存储层显式加载，不存在懒加载句柄。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoringTemplate {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub dimensions: Vec<Dimension>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
