use serde::Deserialize;
use ts_rs::TS;

// 维度输入：顺序由列表顺序决定
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct DimensionInput {
    pub name: String,
    pub weight: f64,
}

// 模板创建请求；初始维度可选，创建时不校验权重总和
#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct CreateTemplateRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub dimensions: Vec<DimensionInput>,
}

// 模板基础信息更新请求（名称/描述；维度走批量编辑接口）
#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct UpdateTemplateRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

// 维度批量编辑请求：整组替换，服务层校验权重总和
#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct ReplaceDimensionsRequest {
    pub dimensions: Vec<DimensionInput>,
}

// 模板列表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct TemplateListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
}
