pub mod items;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::content::requests::{CreateContentRequest, UpdateContentRequest};
use crate::storage::Storage;

pub use items::ContentKind;

pub struct ContentService {
    storage: Option<Arc<dyn Storage>>,
}

impl ContentService {
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

    /// 列出内容（所有已登录用户）
    pub async fn list_items(
        &self,
        request: &HttpRequest,
        kind: ContentKind,
    ) -> ActixResult<HttpResponse> {
        items::list_items(self, request, kind).await
    }

    /// 创建内容（管理员）
    pub async fn create_item(
        &self,
        request: &HttpRequest,
        kind: ContentKind,
        req: CreateContentRequest,
    ) -> ActixResult<HttpResponse> {
        items::create_item(self, request, kind, req).await
    }

    /// 更新内容（管理员）
    pub async fn update_item(
        &self,
        request: &HttpRequest,
        kind: ContentKind,
        id: i64,
        req: UpdateContentRequest,
    ) -> ActixResult<HttpResponse> {
        items::update_item(self, request, kind, id, req).await
    }

    /// 删除内容（管理员）
    pub async fn delete_item(
        &self,
        request: &HttpRequest,
        kind: ContentKind,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        items::delete_item(self, request, kind, id).await
    }
}
