use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::middlewares::RequireJWT;
use crate::models::events::requests::ReviewerTeacherRequest;
use crate::models::events::responses::WhitelistResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use std::sync::Arc;

use super::EventService;

/// 建立评审者-教师指派（管理员）
/// POST /assignments
///
/// 指派集合为空的评审者不受限制；建立首条指派后，
/// 该评审者只能看到指派教师上传的文档。
pub async fn add_assignment(
    service: &EventService,
    request: &HttpRequest,
    req: ReviewerTeacherRequest,
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

    // 双方角色校验
    if let Err(resp) = check_pair_roles(&storage, req.reviewer_id, req.teacher_id).await {
        return Ok(resp);
    }

    match storage
        .add_reviewer_teacher(req.reviewer_id, req.teacher_id)
        .await
    {
        Ok(()) => {
            info!(
                "Reviewer {} assigned to teacher {} by admin {}",
                req.reviewer_id, req.teacher_id, uid
            );
            Ok(HttpResponse::Created().json(ApiResponse::success_empty("指派建立成功")))
        }
        Err(e) => {
            let msg = e.to_string();
            if msg.contains("UNIQUE constraint failed") || msg.contains("Duplicate entry") {
                Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::WhitelistEntryExists,
                    "该指派已存在",
                )))
            } else {
                Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("建立指派失败: {msg}"),
                    )),
                )
            }
        }
    }
}

/// 解除评审者-教师指派（管理员）
/// DELETE /assignments
pub async fn remove_assignment(
    service: &EventService,
    request: &HttpRequest,
    req: ReviewerTeacherRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 管理员专属操作
    if RequireJWT::extract_user_role(request) != Some(UserRole::Admin) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只有管理员可以执行此操作",
        )));
    }

    match storage
        .remove_reviewer_teacher(req.reviewer_id, req.teacher_id)
        .await
    {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("指派已解除"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "该指派不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("解除指派失败: {e}"),
            )),
        ),
    }
}

/// 列出某评审者被指派的教师（管理员）
/// GET /assignments/{reviewer_id}
pub async fn list_assignments(
    service: &EventService,
    request: &HttpRequest,
    reviewer_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 管理员专属操作
    if RequireJWT::extract_user_role(request) != Some(UserRole::Admin) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只有管理员可以执行此操作",
        )));
    }

    match storage.list_reviewer_teachers(reviewer_id).await {
        Ok(items) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(WhitelistResponse { items }, "查询成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询指派失败: {e}"),
            )),
        ),
    }
}

/// 校验指派双方的角色
async fn check_pair_roles(
    storage: &Arc<dyn Storage>,
    reviewer_id: i64,
    teacher_id: i64,
) -> Result<(), HttpResponse> {
    match storage.get_user_by_id(reviewer_id).await {
        Ok(Some(user)) if user.role == UserRole::Reviewer => {}
        Ok(Some(_)) => {
            return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "reviewer_id 对应的用户不是评审者",
            )));
        }
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "评审者不存在",
            )));
        }
        Err(e) => {
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询用户失败: {e}"),
                )),
            );
        }
    }

    match storage.get_user_by_id(teacher_id).await {
        Ok(Some(user)) if user.role == UserRole::Teacher => Ok(()),
        Ok(Some(_)) => Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "teacher_id 对应的用户不是教师",
        ))),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "教师不存在",
        ))),
        Err(e) => Err(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询用户失败: {e}"),
            )),
        ),
    }
}
