use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 评审状态
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ReviewStatus {
    Pending,   // 未完成（瞬态，正常流程不会持久化为终态）
    Completed, // 已完成
}

impl<'de> Deserialize<'de> for ReviewStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "pending" => Ok(ReviewStatus::Pending),
            "completed" => Ok(ReviewStatus::Completed),
            _ => Err(serde::de::Error::custom(format!(
                "无效的评审状态: '{s}'. 支持的状态: pending, completed"
            ))),
        }
    }
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewStatus::Pending => write!(f, "pending"),
            ReviewStatus::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for ReviewStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReviewStatus::Pending),
            "completed" => Ok(ReviewStatus::Completed),
            _ => Err(format!("Invalid review status: {s}")),
        }
    }
}

// 评审实体：每个 (document_id, reviewer_id) 至多一条
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Review {
    pub id: i64,
    pub document_id: i64,
    pub reviewer_id: i64,
    // 加权综合分 0-100，保留两位小数
    pub score: Option<f64>,
    pub comment: Option<String>,
    pub status: ReviewStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 评审明细：每条评审内每个维度一条，重提时整组替换
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReviewDetail {
    pub id: i64,
    pub review_id: i64,
    pub dimension_id: i64,
    pub score: f64,
    pub comment: Option<String>,
}
