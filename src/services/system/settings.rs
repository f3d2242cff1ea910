use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SystemService;
use crate::middlewares::RequireJWT;
use crate::models::system::requests::UpdateGlobalTemplateRequest;
use crate::models::system::responses::GlobalTemplateResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

const GLOBAL_TEMPLATE_KEY: &str = "global_template_id";

/// 读取全局默认模板设置
/// GET /system/global-template
///
/// 未关联活动的文档在上传时使用这里配置的模板。
/// 设置在每次需要时显式读取，不做进程内缓存。
pub async fn get_global_template(
    service: &SystemService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_setting(GLOBAL_TEMPLATE_KEY).await {
        Ok(value) => {
            let template_id = value.and_then(|v| v.parse::<i64>().ok());
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                GlobalTemplateResponse { template_id },
                "查询成功",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("读取设置失败: {e}"),
            )),
        ),
    }
}

/// 更新全局默认模板设置（管理员）
/// PUT /system/global-template
///
/// 变更只影响之后上传的文档；已上传文档的模板绑定保持冻结。
pub async fn update_global_template(
    service: &SystemService,
    request: &HttpRequest,
    req: UpdateGlobalTemplateRequest,
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

    // 指定模板时必须存在
    if let Some(template_id) = req.template_id {
        match storage.get_template_by_id(template_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::TemplateNotFound,
                    "指定的评分模板不存在",
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询模板失败: {e}"),
                    )),
                );
            }
        }
    }

    let value = req
        .template_id
        .map(|id| id.to_string())
        .unwrap_or_default();

    match storage
        .set_setting(GLOBAL_TEMPLATE_KEY, &value, Some(uid))
        .await
    {
        Ok(()) => {
            info!(
                "Global template setting changed to {:?} by admin {}",
                req.template_id, uid
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                GlobalTemplateResponse {
                    template_id: req.template_id,
                },
                "设置更新成功",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("更新设置失败: {e}"),
            )),
        ),
    }
}
