pub mod list;
pub mod scoring;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::reviews::requests::SubmitReviewRequest;
use crate::storage::Storage;

pub struct ReviewService {
    storage: Option<Arc<dyn Storage>>,
}

impl ReviewService {
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

    /// 提交/重提评审
    pub async fn submit_review(
        &self,
        request: &HttpRequest,
        document_id: i64,
        req: SubmitReviewRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_review(self, request, document_id, req).await
    }

    /// 获取我对某文档的评审
    pub async fn get_my_review(
        &self,
        request: &HttpRequest,
        document_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::get_my_review(self, request, document_id).await
    }

    /// 列出文档的全部评审
    pub async fn list_document_reviews(
        &self,
        request: &HttpRequest,
        document_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_document_reviews(self, request, document_id).await
    }

    /// 列出我的全部评审
    pub async fn list_my_reviews(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_my_reviews(self, request).await
    }
}
