use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{DocumentService, check_document_access};
use crate::middlewares::RequireJWT;
use crate::models::documents::responses::DocumentScoresResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::reviews::scoring;

/// 获取文档聚合评分
/// GET /documents/{id}/scores
///
/// average 为已完成评审综合分的算术平均（无评审时为 null）；
/// per_dimension 为各维度原始分的算术平均，不再次加权。
/// 纯读操作，每次重新计算，不做缓存。
pub async fn get_document_scores(
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

    let (completed_reviews, details) = match storage
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

    // 维度信息来自文档冻结的模板；没有模板的文档只有综合平均可言
    let per_dimension = match document.template_id {
        Some(template_id) => match storage.get_template_by_id(template_id).await {
            Ok(Some(template)) => scoring::per_dimension_averages(&template.dimensions, &details),
            Ok(None) => vec![],
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询模板失败: {e}"),
                    )),
                );
            }
        },
        None => vec![],
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        DocumentScoresResponse {
            document_id,
            average: scoring::average_composite(&completed_reviews),
            review_count: completed_reviews.len() as i64,
            per_dimension,
        },
        "查询成功",
    )))
}
