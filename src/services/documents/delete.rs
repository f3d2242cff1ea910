use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::fs;
use std::path::Path;

use super::DocumentService;
use crate::middlewares::RequireJWT;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

/// 删除文档（管理员）
/// DELETE /documents/{id}
///
/// 评审与明细由外键级联删除；记录删除成功后清理磁盘文件。
pub async fn delete_document(
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

    if current_user.role != UserRole::Admin {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只有管理员可以删除文档",
        )));
    }

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

    match storage.delete_document(document_id).await {
        Ok(true) => {
            if !document.file_path.is_empty() && Path::new(&document.file_path).exists() {
                let _ = fs::remove_file(&document.file_path);
            }
            tracing::info!(
                "Document {} deleted by admin {}",
                document_id,
                current_user.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("文档删除成功")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::DocumentNotFound,
            "文档不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("删除文档失败: {e}"),
            )),
        ),
    }
}
