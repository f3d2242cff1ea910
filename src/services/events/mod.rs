pub mod assignments;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;
pub mod whitelist;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::events::requests::{
    CreateEventRequest, DeleteEventRequest, EventListQuery, UpdateEventRequest,
    WhitelistAddRequest,
};
use crate::storage::Storage;

pub struct EventService {
    storage: Option<Arc<dyn Storage>>,
}

impl EventService {
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

    /// 创建活动
    pub async fn create_event(
        &self,
        request: &HttpRequest,
        req: CreateEventRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_event(self, request, req).await
    }

    /// 列出活动（按调用者可见性解析）
    pub async fn list_events(
        &self,
        request: &HttpRequest,
        query: EventListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_events(self, request, query).await
    }

    /// 获取活动详情
    pub async fn get_event(
        &self,
        request: &HttpRequest,
        event_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_event(self, request, event_id).await
    }

    /// 探测活动时间窗口状态
    pub async fn get_event_windows(
        &self,
        request: &HttpRequest,
        event_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_event_windows(self, request, event_id).await
    }

    /// 更新活动
    pub async fn update_event(
        &self,
        request: &HttpRequest,
        event_id: i64,
        req: UpdateEventRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_event(self, request, event_id, req).await
    }

    /// 确认后级联删除活动
    pub async fn delete_event(
        &self,
        request: &HttpRequest,
        event_id: i64,
        req: DeleteEventRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_event(self, request, event_id, req).await
    }

    /// 白名单管理
    pub async fn add_whitelist_member(
        &self,
        request: &HttpRequest,
        event_id: i64,
        role_kind: whitelist::WhitelistKind,
        req: WhitelistAddRequest,
    ) -> ActixResult<HttpResponse> {
        whitelist::add_member(self, request, event_id, role_kind, req).await
    }

    pub async fn remove_whitelist_member(
        &self,
        request: &HttpRequest,
        event_id: i64,
        role_kind: whitelist::WhitelistKind,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        whitelist::remove_member(self, request, event_id, role_kind, user_id).await
    }

    pub async fn list_whitelist_members(
        &self,
        request: &HttpRequest,
        event_id: i64,
        role_kind: whitelist::WhitelistKind,
    ) -> ActixResult<HttpResponse> {
        whitelist::list_members(self, request, event_id, role_kind).await
    }

    /// 评审者-教师指派管理
    pub async fn add_assignment(
        &self,
        request: &HttpRequest,
        req: crate::models::events::requests::ReviewerTeacherRequest,
    ) -> ActixResult<HttpResponse> {
        assignments::add_assignment(self, request, req).await
    }

    pub async fn remove_assignment(
        &self,
        request: &HttpRequest,
        req: crate::models::events::requests::ReviewerTeacherRequest,
    ) -> ActixResult<HttpResponse> {
        assignments::remove_assignment(self, request, req).await
    }

    pub async fn list_assignments(
        &self,
        request: &HttpRequest,
        reviewer_id: i64,
    ) -> ActixResult<HttpResponse> {
        assignments::list_assignments(self, request, reviewer_id).await
    }
}
