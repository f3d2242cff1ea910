pub mod settings;
pub mod status;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::system::requests::UpdateGlobalTemplateRequest;
use crate::storage::Storage;

pub struct SystemService {
    storage: Option<Arc<dyn Storage>>,
}

impl SystemService {
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

    /// 系统运行状态
    pub async fn get_status(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        status::get_status(self, request).await
    }

    /// 读取全局默认模板设置
    pub async fn get_global_template(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        settings::get_global_template(self, request).await
    }

    /// 更新全局默认模板设置（管理员）
    pub async fn update_global_template(
        &self,
        request: &HttpRequest,
        req: UpdateGlobalTemplateRequest,
    ) -> ActixResult<HttpResponse> {
        settings::update_global_template(self, request, req).await
    }
}
