use serde::Deserialize;
use ts_rs::TS;

// 活动创建请求
//
// 时间字段为 UTC+8 民用时间字符串（如 "2024-05-01 12:00:00"），
// 由服务层经 utils::time 统一解析为 UTC。
#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct CreateEventRequest {
    pub name: String,
    pub description: Option<String>,
    pub template_id: i64,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub upload_deadline: Option<String>,
}

// 活动更新请求
//
// 时间字段：缺省 = 不修改，空字符串 = 清除该边界。
// template_id 创建后不可变，因此不在此出现。
#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct UpdateEventRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub upload_deadline: Option<String>,
    pub is_active: Option<bool>,
}

// 破坏性删除确认请求：必须提供活动的准确名称和固定确认短语
#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct DeleteEventRequest {
    pub confirm_name: String,
    pub confirm_phrase: String,
}

// 白名单成员添加请求
#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct WhitelistAddRequest {
    pub user_id: i64,
}

// 评审者-教师指派请求
#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct ReviewerTeacherRequest {
    pub reviewer_id: i64,
    pub teacher_id: i64,
}

// 活动列表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct EventListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
    pub is_active: Option<bool>,
}

// 服务层解析时间字符串后传给存储层的创建数据
#[derive(Debug, Clone)]
pub struct CreateEventData {
    pub name: String,
    pub description: Option<String>,
    pub template_id: i64,
    pub start_time: Option<chrono::DateTime<chrono::Utc>>,
    pub end_time: Option<chrono::DateTime<chrono::Utc>>,
    pub upload_deadline: Option<chrono::DateTime<chrono::Utc>>,
    pub created_by: i64,
}

// 活动更新数据；时间字段外层 None = 不修改，内层 None = 清除边界
#[derive(Debug, Clone, Default)]
pub struct UpdateEventData {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_time: Option<Option<chrono::DateTime<chrono::Utc>>>,
    pub end_time: Option<Option<chrono::DateTime<chrono::Utc>>>,
    pub upload_deadline: Option<Option<chrono::DateTime<chrono::Utc>>>,
    pub is_active: Option<bool>,
}
