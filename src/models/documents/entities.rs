use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 文档状态
//
// 状态只向前推进：首个评审完成时 pending → reviewing；
// 没有任何流程把文档改回 pending。completed 作为保留状态存在，
// 当前没有流程会设置它。
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DocumentStatus {
    Pending,   // 待评审
    Reviewing, // 评审中
    Completed, // 已完成（保留）
}

impl<'de> Deserialize<'de> for DocumentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "pending" => Ok(DocumentStatus::Pending),
            "reviewing" => Ok(DocumentStatus::Reviewing),
            "completed" => Ok(DocumentStatus::Completed),
            _ => Err(serde::de::Error::custom(format!(
                "无效的文档状态: '{s}'. 支持的状态: pending, reviewing, completed"
            ))),
        }
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentStatus::Pending => write!(f, "pending"),
            DocumentStatus::Reviewing => write!(f, "reviewing"),
            DocumentStatus::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for DocumentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(DocumentStatus::Pending),
            "reviewing" => Ok(DocumentStatus::Reviewing),
            "completed" => Ok(DocumentStatus::Completed),
            _ => Err(format!("Invalid document status: {s}")),
        }
    }
}

// 文档实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Document {
    pub id: i64,
    // NULL 表示未关联活动（使用全局默认模板）
    pub event_id: Option<i64>,
    pub uploader_id: i64,
    // 上传时从活动或全局设置解析，此后冻结
    pub template_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub file_name: String,
    // 服务器内部存储路径，不进入 API 响应
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub file_path: String,
    pub status: DocumentStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 评审者-教师指派范围判定
///
/// 指派集合为空时不施加任何限制（与白名单同样的空即全部语义）；
/// 非空时评审者只能看到指派教师上传的文档。
pub fn reviewer_scope_admits(assigned_teacher_ids: &[i64], uploader_id: i64) -> bool {
    assigned_teacher_ids.is_empty() || assigned_teacher_ids.contains(&uploader_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in ["pending", "reviewing", "completed"] {
            let parsed: DocumentStatus = status.parse().unwrap();
            assert_eq!(parsed.to_string(), status);
        }
        assert!("archived".parse::<DocumentStatus>().is_err());
    }

    #[test]
    fn test_reviewer_scope_empty_means_all() {
        assert!(reviewer_scope_admits(&[], 7));
    }

    #[test]
    fn test_reviewer_scope_restricts_to_assigned() {
        assert!(reviewer_scope_admits(&[7, 8], 7));
        assert!(!reviewer_scope_admits(&[7, 8], 9));
    }
}
