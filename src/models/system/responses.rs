use serde::Serialize;
use ts_rs::TS;

// 系统运行状态响应
#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct SystemStatusResponse {
    pub system_name: String,
    pub version: String,
    pub environment: String,
    pub uptime_seconds: i64,
    pub user_count: u64,
}

// 全局默认模板设置响应
#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct GlobalTemplateResponse {
    pub template_id: Option<i64>,
}
