use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TemplateService;
use crate::middlewares::RequireJWT;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

/// 删除模板（管理员）
/// DELETE /templates/{id}
///
/// 被任何活动（含停用的）引用的模板不可删除；维度随模板级联删除。
pub async fn delete_template(
    service: &TemplateService,
    request: &HttpRequest,
    template_id: i64,
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

    match storage.count_events_for_template(template_id, false).await {
        Ok(0) => {}
        Ok(n) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::TemplateInUse,
                format!("模板正被 {n} 个活动引用，无法删除"),
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询活动引用失败: {e}"),
                )),
            );
        }
    }

    match storage.delete_template(template_id).await {
        Ok(true) => {
            info!("Template {} deleted by admin {}", template_id, uid);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("模板删除成功")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TemplateNotFound,
            "模板不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("删除模板失败: {e}"),
            )),
        ),
    }
}
