use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::fs;
use std::io::Write;
use std::path::Path;
use uuid::Uuid;

use super::DocumentService;
use crate::config::AppConfig;
use crate::errors::DocReviewError;
use crate::middlewares::RequireJWT;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate_magic_bytes;

/// 替换文档文件（教师修改稿件）
/// PUT /documents/{id}/file
///
/// 保留文档 id、模板绑定与全部既有评审；旧文件在新记录落库后删除。
/// 活动内文档仍受上传窗口约束。
pub async fn replace_document_file(
    service: &DocumentService,
    request: &HttpRequest,
    document_id: i64,
    payload: Multipart,
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

    // 只有上传者本人或管理员可以换文件
    if current_user.role != UserRole::Admin && document.uploader_id != current_user.id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::DocumentPermissionDenied,
            "只能替换自己上传的文档",
        )));
    }

    // 活动内文档受上传窗口约束
    if let Some(event_id) = document.event_id {
        match storage.get_event_by_id(event_id).await {
            Ok(Some(event)) => {
                if !event.upload_open(chrono::Utc::now()) {
                    return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                        ErrorCode::UploadWindowClosed,
                        "已过上传截止时间",
                    )));
                }
            }
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::EventNotFound,
                    "文档所属活动不存在",
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
    }

    // 新文件落盘
    let (original_name, stored_path) = match save_single_file(payload).await {
        Ok(result) => result,
        Err(resp) => return Ok(resp),
    };

    let old_path = document.file_path.clone();

    match storage
        .replace_document_file(document_id, &original_name, &stored_path)
        .await
    {
        Ok(Some(updated)) => {
            // 记录已更新，清理旧文件
            if !old_path.is_empty() && Path::new(&old_path).exists() {
                let _ = fs::remove_file(&old_path);
            }
            tracing::info!(
                "Document {} file replaced by user {}",
                document_id,
                current_user.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "文档文件已替换")))
        }
        Ok(None) => {
            let _ = fs::remove_file(&stored_path);
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::DocumentNotFound,
                "文档不存在",
            )))
        }
        Err(e) => {
            let _ = fs::remove_file(&stored_path);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::FileUploadFailed,
                    format!("替换文档文件失败: {e}"),
                )),
            )
        }
    }
}

/// 接收 multipart 中的单个 file 字段并落盘，返回（原始文件名，存储路径）
async fn save_single_file(mut payload: Multipart) -> Result<(String, String), HttpResponse> {
    let config = AppConfig::get();
    let upload_dir = &config.upload.dir;
    let max_size = config.upload.max_size;
    let allowed_types = &config.upload.allowed_types;

    if !Path::new(upload_dir).exists()
        && let Err(e) = fs::create_dir_all(upload_dir)
    {
        tracing::error!("{}", DocReviewError::file_operation(format!("{e}")));
        return Err(
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                ErrorCode::FileUploadFailed,
                "创建上传目录失败",
            )),
        );
    }

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name != "file" {
            continue;
        }

        let original_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string())
            .unwrap_or_default();

        let extension = Path::new(&original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_lowercase()))
            .unwrap_or_default();

        if !allowed_types.iter().any(|t| t.to_lowercase() == extension) {
            return Err(HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
                ErrorCode::FileTypeNotAllowed,
                "不支持的文件类型",
            )));
        }

        let stored_name = format!(
            "{}-{}{}",
            chrono::Utc::now().timestamp(),
            Uuid::new_v4(),
            extension
        );
        let file_path = format!("{upload_dir}/{stored_name}");
        let mut f = match fs::File::create(&file_path) {
            Ok(file) => file,
            Err(e) => {
                tracing::error!("{}", DocReviewError::file_operation(format!("{e}")));
                return Err(HttpResponse::InternalServerError().json(
                    ApiResponse::<()>::error_empty(ErrorCode::FileUploadFailed, "文件创建失败"),
                ));
            }
        };

        let mut total_size: usize = 0;
        let mut first_chunk = true;
        while let Some(chunk) = field.next().await {
            let data = match chunk {
                Ok(data) => data,
                Err(e) => {
                    let _ = fs::remove_file(&file_path);
                    tracing::error!("读取上传数据失败: {e}");
                    return Err(HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
                        ErrorCode::FileUploadFailed,
                        "读取上传数据失败",
                    )));
                }
            };

            if first_chunk {
                first_chunk = false;
                if !validate_magic_bytes(&data, &extension) {
                    let _ = fs::remove_file(&file_path);
                    return Err(HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
                        ErrorCode::FileTypeNotAllowed,
                        "文件内容与扩展名不匹配",
                    )));
                }
            }

            total_size += data.len();
            if total_size > max_size {
                let _ = fs::remove_file(&file_path);
                return Err(HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
                    ErrorCode::FileSizeExceeded,
                    "文件大小超出限制",
                )));
            }
            if let Err(e) = f.write_all(&data) {
                let _ = fs::remove_file(&file_path);
                tracing::error!("{}", DocReviewError::file_operation(format!("{e}")));
                return Err(HttpResponse::InternalServerError().json(
                    ApiResponse::<()>::error_empty(ErrorCode::FileUploadFailed, "文件写入失败"),
                ));
            }
        }

        return Ok((original_name, file_path));
    }

    Err(HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
        ErrorCode::FileNotFound,
        "请求中没有文件",
    )))
}
