pub mod delete;
pub mod detail;
pub mod download;
pub mod list;
pub mod replace;
pub mod scores;
pub mod update;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::documents::entities::{Document, reviewer_scope_admits};
use crate::models::documents::requests::{DocumentListQuery, UpdateDocumentRequest};
use crate::models::events::entities::whitelist_admits;
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct DocumentService {
    storage: Option<Arc<dyn Storage>>,
}

impl DocumentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    /// 上传文档
    pub async fn upload_document(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::upload_document(self, request, payload).await
    }

    /// 替换文档文件
    pub async fn replace_document_file(
        &self,
        request: &HttpRequest,
        document_id: i64,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        replace::replace_document_file(self, request, document_id, payload).await
    }

    /// 列出文档
    pub async fn list_documents(
        &self,
        request: &HttpRequest,
        query: DocumentListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_documents(self, request, query).await
    }

    /// 获取文档详情
    pub async fn get_document(
        &self,
        request: &HttpRequest,
        document_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_document(self, request, document_id).await
    }

    /// 获取文档聚合评分
    pub async fn get_document_scores(
        &self,
        request: &HttpRequest,
        document_id: i64,
    ) -> ActixResult<HttpResponse> {
        scores::get_document_scores(self, request, document_id).await
    }

    /// 更新文档元信息
    pub async fn update_document(
        &self,
        request: &HttpRequest,
        document_id: i64,
        update: UpdateDocumentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_document(self, request, document_id, update).await
    }

    /// 下载文档文件
    pub async fn download_document(
        &self,
        request: &HttpRequest,
        document_id: i64,
    ) -> ActixResult<HttpResponse> {
        download::download_document(self, request, document_id).await
    }

    /// 删除文档
    pub async fn delete_document(
        &self,
        request: &HttpRequest,
        document_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_document(self, request, document_id).await
    }
}

/// 文档访问权限检查
///
/// 管理员全部可见；教师只能访问自己上传的文档；评审者受活动白名单
/// （空即全部）与评审者-教师指派范围共同约束。
pub(crate) async fn check_document_access(
    storage: &Arc<dyn Storage>,
    current_user: &User,
    document: &Document,
) -> Result<(), HttpResponse> {
    match current_user.role {
        UserRole::Admin => Ok(()),
        UserRole::Teacher => {
            if document.uploader_id == current_user.id {
                Ok(())
            } else {
                Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::DocumentPermissionDenied,
                    "只能访问自己上传的文档",
                )))
            }
        }
        UserRole::Reviewer => {
            // 指派范围
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
                    ErrorCode::DocumentPermissionDenied,
                    "该文档不在您的评审范围内",
                )));
            }

            // 活动白名单
            if let Some(event_id) = document.event_id {
                let event = match storage.get_event_by_id(event_id).await {
                    Ok(Some(event)) => event,
                    Ok(None) => {
                        return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                            ErrorCode::EventNotFound,
                            "文档所属活动不存在",
                        )));
                    }
                    Err(e) => {
                        return Err(HttpResponse::InternalServerError().json(
                            ApiResponse::error_empty(
                                ErrorCode::InternalServerError,
                                format!("查询活动失败: {e}"),
                            ),
                        ));
                    }
                };

                if !event.is_active {
                    return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                        ErrorCode::EventPermissionDenied,
                        "活动已停用",
                    )));
                }

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
            }

            Ok(())
        }
    }
}
