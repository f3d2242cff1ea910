use super::entities::DocumentStatus;
use serde::Deserialize;
use ts_rs::TS;

// 文档列表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct DocumentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub event_id: Option<i64>,
    pub uploader_id: Option<i64>,
    pub status: Option<DocumentStatus>,
    pub search: Option<String>,
}

// 文档元信息更新请求（标题/描述；换文件走 replace 接口）
#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct UpdateDocumentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

// 上传处理完成后传给存储层的新文档数据
// template_id 在此时已从活动或全局设置解析完毕并就此冻结
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub event_id: Option<i64>,
    pub uploader_id: i64,
    pub template_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub file_name: String,
    pub file_path: String,
}
