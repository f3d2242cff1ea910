use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{DocumentService, check_document_access};
use crate::middlewares::RequireJWT;
use crate::models::documents::responses::DocumentDetailResponse;
use crate::models::reviews::responses::ReviewWithDetails;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::reviews::scoring;

/// 获取文档详情
/// GET /documents/{id}
///
/// 平均分每次读取时基于已完成评审重新计算。
pub async fn get_document(
    service: &DocumentService,
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

    let (completed_reviews, _) = match storage
        .list_completed_reviews_with_details(document_id)
        .await
    {
        Ok(result) => result,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询评审失败: {e}"),
                )),
            );
        }
    };

    let average_score = scoring::average_composite(&completed_reviews);
    let review_count = completed_reviews.len() as i64;

    // 评审者视角附带自己的评审
    let my_review = match storage.get_review(document_id, current_user.id).await {
        Ok(Some(review)) => {
            let details = storage
                .get_review_details(review.id)
                .await
                .unwrap_or_default();
            Some(ReviewWithDetails { review, details })
        }
        _ => None,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        DocumentDetailResponse {
            document,
            average_score,
            review_count,
            my_review,
        },
        "查询成功",
    )))
}
