use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::EventService;
use crate::middlewares::RequireJWT;
use crate::models::events::requests::{CreateEventData, CreateEventRequest};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::time::parse_civil_datetime;
use crate::utils::validate::validate_name;

/// 创建活动（管理员）
/// POST /events
///
/// template_id 在创建时绑定，此后不可更换。
pub async fn create_event(
    service: &EventService,
    request: &HttpRequest,
    req: CreateEventRequest,
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

    // 模板必须存在
    match storage.get_template_by_id(req.template_id).await {
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

    // 民用时间字符串统一在这里解析为 UTC
    let start_time = match parse_optional_time(req.start_time.as_deref()) {
        Ok(t) => t,
        Err(resp) => return Ok(resp),
    };
    let end_time = match parse_optional_time(req.end_time.as_deref()) {
        Ok(t) => t,
        Err(resp) => return Ok(resp),
    };
    let upload_deadline = match parse_optional_time(req.upload_deadline.as_deref()) {
        Ok(t) => t,
        Err(resp) => return Ok(resp),
    };

    if let (Some(start), Some(end)) = (start_time, end_time)
        && start > end
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "评审开始时间不能晚于结束时间",
        )));
    }

    let data = CreateEventData {
        name: req.name.trim().to_string(),
        description: req.description,
        template_id: req.template_id,
        start_time,
        end_time,
        upload_deadline,
        created_by: uid,
    };

    match storage.create_event(data).await {
        Ok(event) => {
            info!("Event {} created by admin {}", event.name, uid);
            Ok(HttpResponse::Created().json(ApiResponse::success(event, "活动创建成功")))
        }
        Err(e) => {
            let msg = e.to_string();
            error!("Event creation failed: {}", msg);
            if msg.contains("UNIQUE constraint failed") || msg.contains("Duplicate entry") {
                Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::EventAlreadyExists,
                    "活动名称已存在",
                )))
            } else {
                Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("创建活动失败: {msg}"),
                    )),
                )
            }
        }
    }
}

/// 解析可选的民用时间字符串；空字符串等同于未设置
pub(crate) fn parse_optional_time(
    input: Option<&str>,
) -> Result<Option<chrono::DateTime<chrono::Utc>>, HttpResponse> {
    match input {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => match parse_civil_datetime(s) {
            Ok(t) => Ok(Some(t)),
            Err(e) => Err(HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
                ErrorCode::BadRequest,
                e.message().to_string(),
            ))),
        },
    }
}
