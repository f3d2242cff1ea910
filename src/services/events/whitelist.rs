use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::EventService;
use crate::middlewares::RequireJWT;
use crate::models::events::requests::WhitelistAddRequest;
use crate::models::events::responses::WhitelistResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

/// 白名单类别：活动的教师名单或评审者名单
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhitelistKind {
    Teachers,
    Reviewers,
}

impl WhitelistKind {
    /// 名单成员要求的用户角色
    fn required_role(&self) -> UserRole {
        match self {
            WhitelistKind::Teachers => UserRole::Teacher,
            WhitelistKind::Reviewers => UserRole::Reviewer,
        }
    }
}

/// 添加白名单成员（管理员）
/// POST /events/{id}/teachers | /events/{id}/reviewers
///
/// 加入首个成员即把活动切换到白名单模式；此前对该角色全体开放。
pub async fn add_member(
    service: &EventService,
    request: &HttpRequest,
    event_id: i64,
    kind: WhitelistKind,
    req: WhitelistAddRequest,
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

    // 活动必须存在
    match storage.get_event_by_id(event_id).await {
        Ok(Some(_)) => {}
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
    }

    // 成员角色必须与名单类别匹配
    match storage.get_user_by_id(req.user_id).await {
        Ok(Some(user)) => {
            if user.role != kind.required_role() {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::BadRequest,
                    format!("用户角色必须是 {}", kind.required_role()),
                )));
            }
        }
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "用户不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询用户失败: {e}"),
                )),
            );
        }
    }

    let result = match kind {
        WhitelistKind::Teachers => storage.add_event_teacher(event_id, req.user_id).await,
        WhitelistKind::Reviewers => storage.add_event_reviewer(event_id, req.user_id).await,
    };

    match result {
        Ok(()) => {
            info!(
                "User {} added to event {} {:?} whitelist by admin {}",
                req.user_id, event_id, kind, uid
            );
            Ok(HttpResponse::Created().json(ApiResponse::success_empty("白名单成员添加成功")))
        }
        Err(e) => {
            let msg = e.to_string();
            if msg.contains("UNIQUE constraint failed") || msg.contains("Duplicate entry") {
                Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::WhitelistEntryExists,
                    "该用户已在白名单中",
                )))
            } else {
                Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("添加白名单成员失败: {msg}"),
                    )),
                )
            }
        }
    }
}

/// 移除白名单成员（管理员）
/// DELETE /events/{id}/teachers/{user_id} | /events/{id}/reviewers/{user_id}
///
/// 移除最后一个成员会让活动回到对该角色全部开放的状态。
pub async fn remove_member(
    service: &EventService,
    request: &HttpRequest,
    event_id: i64,
    kind: WhitelistKind,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 管理员专属操作
    if RequireJWT::extract_user_role(request) != Some(UserRole::Admin) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只有管理员可以执行此操作",
        )));
    }

    let result = match kind {
        WhitelistKind::Teachers => storage.remove_event_teacher(event_id, user_id).await,
        WhitelistKind::Reviewers => storage.remove_event_reviewer(event_id, user_id).await,
    };

    match result {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("白名单成员已移除"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "该用户不在白名单中",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("移除白名单成员失败: {e}"),
            )),
        ),
    }
}

/// 列出白名单成员（管理员）
/// GET /events/{id}/teachers | /events/{id}/reviewers
pub async fn list_members(
    service: &EventService,
    request: &HttpRequest,
    event_id: i64,
    kind: WhitelistKind,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 管理员专属操作
    if RequireJWT::extract_user_role(request) != Some(UserRole::Admin) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只有管理员可以执行此操作",
        )));
    }

    match storage.get_event_by_id(event_id).await {
        Ok(Some(_)) => {}
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
    }

    let result = match kind {
        WhitelistKind::Teachers => storage.list_event_teachers(event_id).await,
        WhitelistKind::Reviewers => storage.list_event_reviewers(event_id).await,
    };

    match result {
        Ok(items) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(WhitelistResponse { items }, "查询成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询白名单失败: {e}"),
            )),
        ),
    }
}
