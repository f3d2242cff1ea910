use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

use super::DocumentService;
use crate::config::AppConfig;
use crate::errors::DocReviewError;
use crate::middlewares::RequireJWT;
use crate::models::documents::requests::NewDocument;
use crate::models::events::entities::{ReviewEvent, whitelist_admits};
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::validate_magic_bytes;

/// multipart 解析结果
struct UploadPayload {
    title: String,
    description: Option<String>,
    event_id: Option<i64>,
    original_name: String,
    stored_path: String,
}

/// 上传文档
/// POST /documents
///
/// multipart 字段：file（必填）、title（必填）、description、event_id。
/// 模板在此时从活动或全局设置解析并冻结到文档上。
pub async fn upload_document(
    service: &DocumentService,
    request: &HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    // 教师上传自己的文档，管理员可代传；评审者不能上传
    if current_user.role == UserRole::Reviewer {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::DocumentPermissionDenied,
            "评审者不能上传文档",
        )));
    }

    // 解析 multipart 并把文件落盘；后续校验失败时负责清理
    let parsed = match read_upload_payload(payload).await {
        Ok(p) => p,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);

    // 活动校验：存在性、启用状态、教师白名单、上传截止时间
    let event = match check_upload_admission(&storage, &current_user, parsed.event_id).await {
        Ok(event) => event,
        Err(resp) => {
            let _ = fs::remove_file(&parsed.stored_path);
            return Ok(resp);
        }
    };

    // 模板解析：活动模板优先，未关联活动时回退到全局默认模板。
    // 这里解析出的值冻结在文档上，之后活动或全局设置的变化不再影响它。
    let template_id = match &event {
        Some(event) => Some(event.template_id),
        None => match storage.get_setting("global_template_id").await {
            Ok(value) => value.and_then(|v| v.parse::<i64>().ok()),
            Err(e) => {
                let _ = fs::remove_file(&parsed.stored_path);
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("读取全局模板设置失败: {e}"),
                    )),
                );
            }
        },
    };

    let new_document = NewDocument {
        event_id: parsed.event_id,
        uploader_id: current_user.id,
        template_id,
        title: parsed.title,
        description: parsed.description,
        file_name: parsed.original_name,
        file_path: parsed.stored_path.clone(),
    };

    match storage.create_document(new_document).await {
        Ok(document) => {
            tracing::info!(
                "Document {} uploaded by user {} (event: {:?}, template: {:?})",
                document.id,
                current_user.id,
                document.event_id,
                document.template_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(document, "文档上传成功")))
        }
        Err(e) => {
            let _ = fs::remove_file(&parsed.stored_path);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::FileUploadFailed,
                    format!("创建文档记录失败: {e}"),
                )),
            )
        }
    }
}

/// 上传准入检查，返回已加载的活动（未关联活动时为 None）
async fn check_upload_admission(
    storage: &Arc<dyn Storage>,
    current_user: &User,
    event_id: Option<i64>,
) -> Result<Option<ReviewEvent>, HttpResponse> {
    let Some(event_id) = event_id else {
        return Ok(None);
    };

    let event = match storage.get_event_by_id(event_id).await {
        Ok(Some(event)) => event,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::EventNotFound,
                "活动不存在",
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

    // 教师白名单（空即全部）；管理员代传不受白名单约束
    if current_user.role == UserRole::Teacher {
        let whitelisted = storage.list_event_teacher_ids(event_id).await.map_err(|e| {
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询白名单失败: {e}"),
            ))
        })?;

        if !whitelist_admits(&whitelisted, current_user.id) {
            return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::EventPermissionDenied,
                "您不在该活动的教师白名单中",
            )));
        }
    }

    // 上传窗口：截止时刻本身仍可上传
    if !event.upload_open(chrono::Utc::now()) {
        return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::UploadWindowClosed,
            "已过上传截止时间",
        )));
    }

    Ok(Some(event))
}

/// 解析 multipart：文本字段 + 单个文件落盘
///
/// 文件流式写入，首块校验魔术字节，超限即中止并清理。
async fn read_upload_payload(mut payload: Multipart) -> Result<UploadPayload, HttpResponse> {
    let config = AppConfig::get();
    let upload_dir = &config.upload.dir;
    let max_size = config.upload.max_size;
    let allowed_types = &config.upload.allowed_types;

    // 确保上传目录存在
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

    let mut title = String::new();
    let mut description: Option<String> = None;
    let mut event_id: Option<i64> = None;
    let mut original_name = String::new();
    let mut stored_path = String::new();
    let mut file_uploaded = false;

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        match name.as_str() {
            "title" => {
                title = read_text_field(&mut field).await?.trim().to_string();
            }
            "description" => {
                let value = read_text_field(&mut field).await?.trim().to_string();
                if !value.is_empty() {
                    description = Some(value);
                }
            }
            "event_id" => {
                let value = read_text_field(&mut field).await?.trim().to_string();
                if !value.is_empty() {
                    match value.parse::<i64>() {
                        Ok(id) => event_id = Some(id),
                        Err(_) => {
                            cleanup(&stored_path);
                            return Err(HttpResponse::BadRequest().json(
                                ApiResponse::<()>::error_empty(
                                    ErrorCode::BadRequest,
                                    "event_id 必须是整数",
                                ),
                            ));
                        }
                    }
                }
            }
            "file" => {
                if file_uploaded {
                    cleanup(&stored_path);
                    return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::MultifileUploadNotAllowed,
                        "一次只能上传一个文件",
                    )));
                }
                file_uploaded = true;

                original_name = content_disposition
                    .and_then(|cd| cd.get_filename())
                    .map(|s| s.to_string())
                    .unwrap_or_default();

                // 提取扩展名并校验
                let extension = Path::new(&original_name)
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| format!(".{}", ext.to_lowercase()))
                    .unwrap_or_default();

                if !allowed_types.iter().any(|t| t.to_lowercase() == extension) {
                    return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::FileTypeNotAllowed,
                        "不支持的文件类型",
                    )));
                }

                let stored_name =
                    format!("{}-{}{}", chrono::Utc::now().timestamp(), Uuid::new_v4(), extension);
                let file_path = format!("{upload_dir}/{stored_name}");
                let mut f = match fs::File::create(&file_path) {
                    Ok(file) => file,
                    Err(e) => {
                        tracing::error!("{}", DocReviewError::file_operation(format!("{e}")));
                        return Err(HttpResponse::InternalServerError().json(
                            ApiResponse::<()>::error_empty(
                                ErrorCode::FileUploadFailed,
                                "文件创建失败",
                            ),
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
                            return Err(HttpResponse::BadRequest().json(
                                ApiResponse::<()>::error_empty(
                                    ErrorCode::FileUploadFailed,
                                    "读取上传数据失败",
                                ),
                            ));
                        }
                    };

                    // 第一个 chunk 时验证魔术字节
                    if first_chunk {
                        first_chunk = false;
                        if !validate_magic_bytes(&data, &extension) {
                            let _ = fs::remove_file(&file_path);
                            return Err(HttpResponse::BadRequest().json(
                                ApiResponse::<()>::error_empty(
                                    ErrorCode::FileTypeNotAllowed,
                                    "文件内容与扩展名不匹配",
                                ),
                            ));
                        }
                    }

                    total_size += data.len();
                    if total_size > max_size {
                        let _ = fs::remove_file(&file_path);
                        return Err(HttpResponse::BadRequest().json(
                            ApiResponse::<()>::error_empty(
                                ErrorCode::FileSizeExceeded,
                                "文件大小超出限制",
                            ),
                        ));
                    }
                    if let Err(e) = f.write_all(&data) {
                        let _ = fs::remove_file(&file_path);
                        tracing::error!("{}", DocReviewError::file_operation(format!("{e}")));
                        return Err(HttpResponse::InternalServerError().json(
                            ApiResponse::<()>::error_empty(
                                ErrorCode::FileUploadFailed,
                                "文件写入失败",
                            ),
                        ));
                    }
                }

                stored_path = file_path;
            }
            _ => {}
        }
    }

    if !file_uploaded {
        return Err(HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
            ErrorCode::FileNotFound,
            "请求中没有文件",
        )));
    }

    if title.is_empty() {
        cleanup(&stored_path);
        return Err(HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
            ErrorCode::BadRequest,
            "请输入文档标题",
        )));
    }

    Ok(UploadPayload {
        title,
        description,
        event_id,
        original_name,
        stored_path,
    })
}

/// 读取文本字段内容
pub(crate) async fn read_text_field(
    field: &mut actix_multipart::Field,
) -> Result<String, HttpResponse> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        match chunk {
            Ok(data) => bytes.extend_from_slice(&data),
            Err(_) => {
                return Err(HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
                    ErrorCode::BadRequest,
                    "读取表单字段失败",
                )));
            }
        }
    }
    String::from_utf8(bytes).map_err(|_| {
        HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
            ErrorCode::BadRequest,
            "表单字段必须是 UTF-8 文本",
        ))
    })
}

fn cleanup(stored_path: &str) {
    if !stored_path.is_empty() {
        let _ = fs::remove_file(stored_path);
    }
}
