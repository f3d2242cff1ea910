use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::EventService;
use crate::middlewares::RequireJWT;
use crate::models::events::entities::{ReviewEvent, whitelist_admits};
use crate::models::events::responses::EventWindowsResponse;
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 获取活动详情
/// GET /events/{id}
pub async fn get_event(
    service: &EventService,
    request: &HttpRequest,
    event_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    let event = match load_visible_event(&storage, &current_user, event_id).await {
        Ok(event) => event,
        Err(resp) => return Ok(resp),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(event, "查询成功")))
}

/// 探测活动时间窗口状态
/// GET /events/{id}/windows
///
/// 纯读操作：窗口在每次请求时对当前时刻实时判定，
/// 截止时间的"过期"只会在下一次请求中被惰性发现。
pub async fn get_event_windows(
    service: &EventService,
    request: &HttpRequest,
    event_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    let event = match load_visible_event(&storage, &current_user, event_id).await {
        Ok(event) => event,
        Err(resp) => return Ok(resp),
    };

    let now = chrono::Utc::now();
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        EventWindowsResponse {
            upload_open: event.upload_open(now),
            review_window: event.review_window(now),
        },
        "查询成功",
    )))
}

/// 加载活动并执行可见性检查
///
/// 管理员全可见；教师/评审者要求活动启用且通过对应角色的白名单。
pub(crate) async fn load_visible_event(
    storage: &Arc<dyn Storage>,
    current_user: &User,
    event_id: i64,
) -> Result<ReviewEvent, HttpResponse> {
    let event = match storage.get_event_by_id(event_id).await {
        Ok(Some(event)) => event,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::EventNotFound,
                "活动不存在",
            )));
        }
        Err(e) => {
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询活动失败: {e}"),
                )),
            );
        }
    };

    if current_user.role == UserRole::Admin {
        return Ok(event);
    }

    if !event.is_active {
        return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::EventPermissionDenied,
            "活动已停用",
        )));
    }

    let whitelisted = match current_user.role {
        UserRole::Teacher => storage.list_event_teacher_ids(event_id).await,
        UserRole::Reviewer => storage.list_event_reviewer_ids(event_id).await,
        UserRole::Admin => unreachable!("admin handled above"),
    };

    let whitelisted = whitelisted.map_err(|e| {
        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::InternalServerError,
            format!("查询白名单失败: {e}"),
        ))
    })?;

    if !whitelist_admits(&whitelisted, current_user.id) {
        return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::EventPermissionDenied,
            "您无权查看该活动",
        )));
    }

    Ok(event)
}
