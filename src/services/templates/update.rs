use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TemplateService;
use crate::middlewares::RequireJWT;
use crate::models::templates::requests::UpdateTemplateRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_name;

/// 更新模板基础信息（管理员）
/// PUT /templates/{id}
///
/// 只改名称/描述；维度修改走批量编辑接口，且受活动引用约束。
pub async fn update_template(
    service: &TemplateService,
    request: &HttpRequest,
    template_id: i64,
    req: UpdateTemplateRequest,
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

    if let Some(ref name) = req.name
        && let Err(msg) = validate_name(name)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }

    match storage.update_template_info(template_id, req).await {
        Ok(Some(template)) => {
            info!("Template {} updated by admin {}", template_id, uid);
            Ok(HttpResponse::Ok().json(ApiResponse::success(template, "模板更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TemplateNotFound,
            "模板不存在",
        ))),
        Err(e) => {
            let msg = e.to_string();
            if msg.contains("UNIQUE constraint failed") || msg.contains("Duplicate entry") {
                Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::TemplateAlreadyExists,
                    "模板名称已存在",
                )))
            } else {
                Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("更新模板失败: {msg}"),
                    )),
                )
            }
        }
    }
}
