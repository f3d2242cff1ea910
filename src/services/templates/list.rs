use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TemplateService;
use crate::models::templates::requests::TemplateListQuery;
use crate::models::{ApiResponse, ErrorCode};

/// 列出模板
/// GET /templates
pub async fn list_templates(
    service: &TemplateService,
    request: &HttpRequest,
    query: TemplateListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_templates_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询模板列表失败: {e}"),
            )),
        ),
    }
}

/// 获取模板详情（含按序维度）
/// GET /templates/{id}
pub async fn get_template(
    service: &TemplateService,
    request: &HttpRequest,
    template_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_template_by_id(template_id).await {
        Ok(Some(template)) => Ok(HttpResponse::Ok().json(ApiResponse::success(template, "查询成功"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TemplateNotFound,
            "模板不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询模板失败: {e}"),
            )),
        ),
    }
}
