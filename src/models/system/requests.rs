use serde::Deserialize;
use ts_rs::TS;

// 全局默认模板设置更新请求；null 表示清除
#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct UpdateGlobalTemplateRequest {
    pub template_id: Option<i64>,
}
