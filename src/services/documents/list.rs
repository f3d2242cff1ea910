use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::{HashMap, HashSet};

use super::DocumentService;
use crate::middlewares::RequireJWT;
use crate::models::documents::entities::{Document, reviewer_scope_admits};
use crate::models::documents::requests::DocumentListQuery;
use crate::models::documents::responses::DocumentListResponse;
use crate::models::events::entities::whitelist_admits;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode, PaginationInfo};

/// 列出文档
/// GET /documents
///
/// 管理员看到全部；教师只看到自己上传的；评审者看到活动白名单
/// 与指派范围允许的文档。
pub async fn list_documents(
    service: &DocumentService,
    request: &HttpRequest,
    query: DocumentListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    match current_user.role {
        UserRole::Admin => match storage.list_documents_with_pagination(query).await {
            Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询文档列表失败: {e}"),
                )),
            ),
        },
        UserRole::Teacher => {
            // 教师强制限定为自己上传的文档
            let query = DocumentListQuery {
                uploader_id: Some(current_user.id),
                ..query
            };
            match storage.list_documents_with_pagination(query).await {
                Ok(response) => {
                    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
                }
                Err(e) => Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询文档列表失败: {e}"),
                    )),
                ),
            }
        }
        UserRole::Reviewer => list_documents_for_reviewer(service, request, query).await,
    }
}

/// 评审者视角的文档列表：先取全集再按可见性过滤，最后内存分页
async fn list_documents_for_reviewer(
    service: &DocumentService,
    request: &HttpRequest,
    query: DocumentListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let reviewer_id = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    let page = query.page.unwrap_or(1).max(1);
    let size = query.size.unwrap_or(10).clamp(1, 100);

    // 全量拉取后在内存里过滤（文档规模与教师端 stats 同量级）
    let full_query = DocumentListQuery {
        page: Some(1),
        size: Some(10000),
        ..query
    };

    let documents = match storage.list_documents_with_pagination(full_query).await {
        Ok(response) => response.items,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询文档列表失败: {e}"),
                )),
            );
        }
    };

    // 启用中的活动及其评审者白名单
    let active_events = match storage.list_active_events().await {
        Ok(events) => events,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询活动失败: {e}"),
                )),
            );
        }
    };

    let mut admitted_events: HashMap<i64, bool> = HashMap::new();
    for event in &active_events {
        let whitelisted = match storage.list_event_reviewer_ids(event.id).await {
            Ok(ids) => ids,
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询白名单失败: {e}"),
                    )),
                );
            }
        };
        admitted_events.insert(event.id, whitelist_admits(&whitelisted, reviewer_id));
    }
    let active_event_ids: HashSet<i64> = active_events.iter().map(|e| e.id).collect();

    // 评审者-教师指派范围
    let assigned = match storage.list_reviewer_teacher_ids(reviewer_id).await {
        Ok(ids) => ids,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询指派失败: {e}"),
                )),
            );
        }
    };

    let visible: Vec<Document> = documents
        .into_iter()
        .filter(|doc| {
            if !reviewer_scope_admits(&assigned, doc.uploader_id) {
                return false;
            }
            match doc.event_id {
                // 未关联活动的文档对全部评审者开放
                None => true,
                Some(event_id) => {
                    active_event_ids.contains(&event_id)
                        && admitted_events.get(&event_id).copied().unwrap_or(false)
                }
            }
        })
        .collect();

    let total = visible.len() as i64;
    let total_pages = if total == 0 { 0 } else { (total + size - 1) / size };
    let items: Vec<Document> = visible
        .into_iter()
        .skip(((page - 1) * size) as usize)
        .take(size as usize)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        DocumentListResponse {
            items,
            pagination: PaginationInfo {
                page,
                page_size: size,
                total,
                total_pages,
            },
        },
        "查询成功",
    )))
}
