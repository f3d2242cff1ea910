use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::EventService;
use super::create::parse_optional_time;
use crate::middlewares::RequireJWT;
use crate::models::events::requests::{UpdateEventData, UpdateEventRequest};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_name;

/// 更新活动（管理员）
/// PUT /events/{id}
///
/// 时间字段：缺省不修改，空字符串清除该边界。
/// template_id 创建后不可变，请求中不提供该字段。
pub async fn update_event(
    service: &EventService,
    request: &HttpRequest,
    event_id: i64,
    req: UpdateEventRequest,
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

    let existing = match storage.get_event_by_id(event_id).await {
        Ok(Some(event)) => event,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::EventNotFound,
                "活动不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询活动失败: {e}"),
                )),
            );
        }
    };

    if let Some(ref name) = req.name
        && let Err(msg) = validate_name(name)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }

    // 空字符串 → Some(None) 清除；非空 → Some(Some(t))；缺省 → None 不修改
    let mut data = UpdateEventData {
        name: req.name.map(|n| n.trim().to_string()),
        description: req.description,
        is_active: req.is_active,
        ..Default::default()
    };

    if let Some(ref raw) = req.start_time {
        data.start_time = Some(match parse_optional_time(Some(raw)) {
            Ok(t) => t,
            Err(resp) => return Ok(resp),
        });
    }
    if let Some(ref raw) = req.end_time {
        data.end_time = Some(match parse_optional_time(Some(raw)) {
            Ok(t) => t,
            Err(resp) => return Ok(resp),
        });
    }
    if let Some(ref raw) = req.upload_deadline {
        data.upload_deadline = Some(match parse_optional_time(Some(raw)) {
            Ok(t) => t,
            Err(resp) => return Ok(resp),
        });
    }

    // 校验更新后的时间区间
    let next_start = data.start_time.unwrap_or(existing.start_time);
    let next_end = data.end_time.unwrap_or(existing.end_time);
    if let (Some(start), Some(end)) = (next_start, next_end)
        && start > end
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "评审开始时间不能晚于结束时间",
        )));
    }

    match storage.update_event(event_id, data).await {
        Ok(Some(event)) => {
            info!("Event {} updated by admin {}", event_id, uid);
            Ok(HttpResponse::Ok().json(ApiResponse::success(event, "活动更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::EventNotFound,
            "活动不存在",
        ))),
        Err(e) => {
            let msg = e.to_string();
            if msg.contains("UNIQUE constraint failed") || msg.contains("Duplicate entry") {
                Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::EventAlreadyExists,
                    "活动名称已存在",
                )))
            } else {
                Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("更新活动失败: {msg}"),
                    )),
                )
            }
        }
    }
}
