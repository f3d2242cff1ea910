use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ContentService;
use crate::middlewares::RequireJWT;
use crate::models::content::requests::{CreateContentRequest, UpdateContentRequest};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

/// 内容类别：公告或评审说明
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Announcements,
    Instructions,
}

/// 列出内容
/// GET /announcements | /instructions
pub async fn list_items(
    service: &ContentService,
    request: &HttpRequest,
    kind: ContentKind,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match kind {
        ContentKind::Announcements => storage.list_announcements().await,
        ContentKind::Instructions => storage.list_instructions().await,
    };

    match result {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(items, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询内容失败: {e}"),
            )),
        ),
    }
}

/// 创建内容（管理员）
/// POST /announcements | /instructions
pub async fn create_item(
    service: &ContentService,
    request: &HttpRequest,
    kind: ContentKind,
    req: CreateContentRequest,
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

    if req.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "标题不能为空",
        )));
    }

    let result = match kind {
        ContentKind::Announcements => storage.create_announcement(uid, req).await,
        ContentKind::Instructions => storage.create_instruction(uid, req).await,
    };

    match result {
        Ok(item) => {
            info!("{:?} item {} created by admin {}", kind, item.id, uid);
            Ok(HttpResponse::Created().json(ApiResponse::success(item, "创建成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("创建内容失败: {e}"),
            )),
        ),
    }
}

/// 更新内容（管理员）
/// PUT /announcements/{id} | /instructions/{id}
pub async fn update_item(
    service: &ContentService,
    request: &HttpRequest,
    kind: ContentKind,
    id: i64,
    req: UpdateContentRequest,
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
        ContentKind::Announcements => storage.update_announcement(id, req).await,
        ContentKind::Instructions => storage.update_instruction(id, req).await,
    };

    match result {
        Ok(Some(item)) => Ok(HttpResponse::Ok().json(ApiResponse::success(item, "更新成功"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ContentNotFound,
            "内容不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("更新内容失败: {e}"),
            )),
        ),
    }
}

/// 删除内容（管理员）
/// DELETE /announcements/{id} | /instructions/{id}
pub async fn delete_item(
    service: &ContentService,
    request: &HttpRequest,
    kind: ContentKind,
    id: i64,
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
        ContentKind::Announcements => storage.delete_announcement(id).await,
        ContentKind::Instructions => storage.delete_instruction(id).await,
    };

    match result {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("删除成功"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ContentNotFound,
            "内容不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("删除内容失败: {e}"),
            )),
        ),
    }
}
