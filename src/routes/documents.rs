use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::documents::requests::{DocumentListQuery, UpdateDocumentRequest};
use crate::services::DocumentService;

// 懒加载的全局 DocumentService 实例
static DOCUMENT_SERVICE: Lazy<DocumentService> = Lazy::new(DocumentService::new_lazy);

// 列出文档
pub async fn list_documents(
    req: HttpRequest,
    query: web::Query<DocumentListQuery>,
) -> ActixResult<HttpResponse> {
    DOCUMENT_SERVICE.list_documents(&req, query.into_inner()).await
}

// 上传文档（multipart：file + title + description + event_id）
pub async fn upload_document(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    DOCUMENT_SERVICE.upload_document(&req, payload).await
}

// 获取文档详情
pub async fn get_document(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    DOCUMENT_SERVICE.get_document(&req, path.into_inner()).await
}

// 获取文档聚合评分
pub async fn get_document_scores(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    DOCUMENT_SERVICE
        .get_document_scores(&req, path.into_inner())
        .await
}

// 更新文档元信息
pub async fn update_document(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateDocumentRequest>,
) -> ActixResult<HttpResponse> {
    DOCUMENT_SERVICE
        .update_document(&req, path.into_inner(), body.into_inner())
        .await
}

// 替换文档文件
pub async fn replace_document_file(
    req: HttpRequest,
    path: web::Path<i64>,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    DOCUMENT_SERVICE
        .replace_document_file(&req, path.into_inner(), payload)
        .await
}

// 下载文档文件
pub async fn download_document(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    DOCUMENT_SERVICE
        .download_document(&req, path.into_inner())
        .await
}

// 删除文档
pub async fn delete_document(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    DOCUMENT_SERVICE.delete_document(&req, path.into_inner()).await
}

// 配置路由
pub fn configure_document_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/documents")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_documents))
            .route("", web::post().to(upload_document))
            .route("/{id}", web::get().to(get_document))
            .route("/{id}", web::put().to(update_document))
            .route("/{id}", web::delete().to(delete_document))
            .route("/{id}/scores", web::get().to(get_document_scores))
            .route("/{id}/file", web::get().to(download_document))
            .route("/{id}/file", web::put().to(replace_document_file)),
    );
}
