use serde::Deserialize;
use ts_rs::TS;

// 内容创建请求
#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct CreateContentRequest {
    pub title: String,
    pub content: String,
}

// 内容更新请求
#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct UpdateContentRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}
