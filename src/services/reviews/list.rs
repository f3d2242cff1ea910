use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ReviewService;
use crate::middlewares::RequireJWT;
use crate::models::reviews::responses::DocumentReviewsResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::documents::check_document_access;

/// 获取我对某文档的评审
/// GET /reviews/documents/{id}/my
pub async fn get_my_review(
    service: &ReviewService,
    request: &HttpRequest,
    document_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user_id = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    match storage.get_review(document_id, user_id).await {
        Ok(Some(review)) => {
            let details = storage
                .get_review_details(review.id)
                .await
                .unwrap_or_default();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                crate::models::reviews::responses::ReviewWithDetails { review, details },
                "查询成功",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ReviewNotFound,
            "尚未评审该文档",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询评审失败: {e}"),
            )),
        ),
    }
}

/// 列出文档的全部评审（含维度明细）
/// GET /reviews/documents/{id}/all
pub async fn list_document_reviews(
    service: &ReviewService,
    request: &HttpRequest,
    document_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

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

    if let Err(resp) = check_document_access(&storage, &current_user, &document).await {
        return Ok(resp);
    }

    match storage.list_reviews_with_details(document_id).await {
        Ok(items) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(DocumentReviewsResponse { items }, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询评审列表失败: {e}"),
            )),
        ),
    }
}

/// 列出我的全部评审
/// GET /reviews/my
pub async fn list_my_reviews(
    service: &ReviewService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user_id = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    match storage.list_reviews_by_reviewer(user_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(items, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询评审失败: {e}"),
            )),
        ),
    }
}
