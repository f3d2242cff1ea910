use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::{ReviewService, scoring};
use crate::middlewares::RequireJWT;
use crate::models::documents::entities::{Document, reviewer_scope_admits};
use crate::models::events::entities::{ReviewWindowStatus, whitelist_admits};
use crate::models::reviews::requests::SubmitReviewRequest;
use crate::models::reviews::responses::ReviewWithDetails;
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 提交/重提评审
/// POST /reviews/documents/{id}
///
/// 全部校验（窗口、可见性、模板、维度分值）在任何写入之前完成；
/// 评审行与明细的持久化由存储层在单事务内执行。
pub async fn submit_review(
    service: &ReviewService,
    request: &HttpRequest,
    document_id: i64,
    req: SubmitReviewRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    // 只有评审者角色可以打分（管理员不参与评审）
    if current_user.role != UserRole::Reviewer {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::ReviewPermissionDenied,
            "只有评审者可以提交评审",
        )));
    }

    // 获取文档
    let document = match storage.get_document_by_id(document_id).await {
        Ok(Some(doc)) => doc,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::DocumentNotFound,
                "文档不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询文档失败: {e}"),
                )),
            );
        }
    };

    // 活动内文档：可见性 + 时间窗口门禁
    if let Err(resp) = check_review_admission(&storage, &current_user, &document).await {
        return Ok(resp);
    }

    // 模板解析：上传时冻结在文档上；未解析出模板的文档无法被评审。
    // 此检查先于任何单项分值校验。
    let template_id = match document.template_id {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::NoTemplateConfigured,
                "该文档未配置评分模板，无法提交评审",
            )));
        }
    };

    let template = match storage.get_template_by_id(template_id).await {
        Ok(Some(t)) => t,
        Ok(None) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::NoTemplateConfigured,
                "该文档引用的评分模板已不存在",
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
    };

    // 维度校验 + 综合分计算；失败则整体拒绝，不写任何明细
    let composite = match scoring::compute_composite(&template.dimensions, &req.scores) {
        Ok(score) => score,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ScoreValidationFailed,
                e.message().to_string(),
            )));
        }
    };

    // 单事务持久化：upsert 评审、替换明细、推进文档状态
    match storage
        .submit_review(
            document_id,
            current_user.id,
            composite,
            req.comment,
            req.scores,
        )
        .await
    {
        Ok(review) => {
            info!(
                "Reviewer {} submitted review for document {} (composite {})",
                current_user.id, document_id, composite
            );
            let details = storage
                .get_review_details(review.id)
                .await
                .unwrap_or_default();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                ReviewWithDetails { review, details },
                "评审提交成功",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("评审提交失败: {e}"),
            )),
        ),
    }
}

/// 评审写入的准入检查：活动可见性、指派范围与时间窗口
///
/// 未关联活动的文档不受窗口限制；指派范围对所有文档生效。
async fn check_review_admission(
    storage: &Arc<dyn Storage>,
    current_user: &User,
    document: &Document,
) -> Result<(), HttpResponse> {
    // 评审者-教师指派：非空集合之外的上传者不可评
    let assigned = storage
        .list_reviewer_teacher_ids(current_user.id)
        .await
        .map_err(|e| {
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询指派失败: {e}"),
            ))
        })?;

    if !reviewer_scope_admits(&assigned, document.uploader_id) {
        return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::ReviewPermissionDenied,
            "该文档不在您的评审范围内",
        )));
    }

    let Some(event_id) = document.event_id else {
        return Ok(());
    };

    let event = match storage.get_event_by_id(event_id).await {
        Ok(Some(event)) => event,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::EventNotFound,
                "文档所属活动不存在",
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

    if !event.is_active {
        return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::EventPermissionDenied,
            "活动已停用",
        )));
    }

    // 白名单可见性：空名单对全部评审者开放
    let whitelisted = storage
        .list_event_reviewer_ids(event_id)
        .await
        .map_err(|e| {
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询白名单失败: {e}"),
            ))
        })?;

    if !whitelist_admits(&whitelisted, current_user.id) {
        return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::EventPermissionDenied,
            "您不在该活动的评审白名单中",
        )));
    }

    // 时间窗口：每次请求实时判定，只有 active 允许写入
    match event.review_window(chrono::Utc::now()) {
        ReviewWindowStatus::Active => Ok(()),
        ReviewWindowStatus::NotStarted => Err(HttpResponse::Forbidden().json(
            ApiResponse::error_empty(ErrorCode::ReviewWindowClosed, "评审尚未开始"),
        )),
        ReviewWindowStatus::Ended => Err(HttpResponse::Forbidden().json(
            ApiResponse::error_empty(ErrorCode::ReviewWindowClosed, "评审已结束"),
        )),
    }
}
