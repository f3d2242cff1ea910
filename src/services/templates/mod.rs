pub mod create;
pub mod delete;
pub mod dimensions;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::templates::requests::{
    CreateTemplateRequest, ReplaceDimensionsRequest, TemplateListQuery, UpdateTemplateRequest,
};
use crate::storage::Storage;

pub struct TemplateService {
    storage: Option<Arc<dyn Storage>>,
}

impl TemplateService {
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

    /// 创建模板
    pub async fn create_template(
        &self,
        request: &HttpRequest,
        req: CreateTemplateRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_template(self, request, req).await
    }

    /// 列出模板
    pub async fn list_templates(
        &self,
        request: &HttpRequest,
        query: TemplateListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_templates(self, request, query).await
    }

    /// 获取模板详情
    pub async fn get_template(
        &self,
        request: &HttpRequest,
        template_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::get_template(self, request, template_id).await
    }

    /// 更新模板基础信息
    pub async fn update_template(
        &self,
        request: &HttpRequest,
        template_id: i64,
        req: UpdateTemplateRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_template(self, request, template_id, req).await
    }

    /// 批量编辑模板维度
    pub async fn replace_dimensions(
        &self,
        request: &HttpRequest,
        template_id: i64,
        req: ReplaceDimensionsRequest,
    ) -> ActixResult<HttpResponse> {
        dimensions::replace_dimensions(self, request, template_id, req).await
    }

    /// 删除模板
    pub async fn delete_template(
        &self,
        request: &HttpRequest,
        template_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_template(self, request, template_id).await
    }
}
