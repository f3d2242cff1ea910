use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::TemplateService;
use crate::middlewares::RequireJWT;
use crate::models::templates::requests::CreateTemplateRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_name;

/// 创建模板（管理员）
/// POST /templates
///
/// 初始维度可选；创建入口不校验权重总和（批量编辑入口才校验）。
pub async fn create_template(
    service: &TemplateService,
    request: &HttpRequest,
    req: CreateTemplateRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let uid = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    // 管理员专属操作
    if RequireJWT::extract_user_role(request) != Some(UserRole::Admin) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只有管理员可以执行此操作",
        )));
    }

    if let Err(msg) = validate_name(&req.name) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }

    for dim in &req.dimensions {
        if dim.name.trim().is_empty() {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "维度名称不能为空",
            )));
        }
        if !dim.weight.is_finite() || dim.weight < 0.0 {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::DimensionWeightInvalid,
                format!("维度 \"{}\" 的权重无效", dim.name),
            )));
        }
    }

    match storage.create_template(req).await {
        Ok(template) => {
            info!("Template {} created by admin {}", template.name, uid);
            Ok(HttpResponse::Created().json(ApiResponse::success(template, "模板创建成功")))
        }
        Err(e) => {
            let msg = e.to_string();
            error!("Template creation failed: {}", msg);
            if msg.contains("UNIQUE constraint failed") || msg.contains("Duplicate entry") {
                Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::TemplateAlreadyExists,
                    "模板名称已存在",
                )))
            } else {
                Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("创建模板失败: {msg}"),
                    )),
                )
            }
        }
    }
}
