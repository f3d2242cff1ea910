use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::events::requests::{
    CreateEventRequest, DeleteEventRequest, EventListQuery, ReviewerTeacherRequest,
    UpdateEventRequest, WhitelistAddRequest,
};
use crate::services::EventService;
use crate::services::events::whitelist::WhitelistKind;

// 懒加载的全局 EventService 实例
static EVENT_SERVICE: Lazy<EventService> = Lazy::new(EventService::new_lazy);

// 列出活动（按调用者可见性解析）
pub async fn list_events(
    req: HttpRequest,
    query: web::Query<EventListQuery>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.list_events(&req, query.into_inner()).await
}

// 创建活动
pub async fn create_event(
    req: HttpRequest,
    body: web::Json<CreateEventRequest>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.create_event(&req, body.into_inner()).await
}

// 获取活动详情
pub async fn get_event(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.get_event(&req, path.into_inner()).await
}

// 探测时间窗口状态
pub async fn get_event_windows(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.get_event_windows(&req, path.into_inner()).await
}

// 更新活动
pub async fn update_event(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateEventRequest>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE
        .update_event(&req, path.into_inner(), body.into_inner())
        .await
}

// 确认后级联删除活动
pub async fn delete_event(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<DeleteEventRequest>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE
        .delete_event(&req, path.into_inner(), body.into_inner())
        .await
}

// ==================== 白名单 ====================

pub async fn add_event_teacher(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<WhitelistAddRequest>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE
        .add_whitelist_member(&req, path.into_inner(), WhitelistKind::Teachers, body.into_inner())
        .await
}

pub async fn remove_event_teacher(
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
) -> ActixResult<HttpResponse> {
    let (event_id, user_id) = path.into_inner();
    EVENT_SERVICE
        .remove_whitelist_member(&req, event_id, WhitelistKind::Teachers, user_id)
        .await
}

pub async fn list_event_teachers(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE
        .list_whitelist_members(&req, path.into_inner(), WhitelistKind::Teachers)
        .await
}

pub async fn add_event_reviewer(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<WhitelistAddRequest>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE
        .add_whitelist_member(&req, path.into_inner(), WhitelistKind::Reviewers, body.into_inner())
        .await
}

pub async fn remove_event_reviewer(
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
) -> ActixResult<HttpResponse> {
    let (event_id, user_id) = path.into_inner();
    EVENT_SERVICE
        .remove_whitelist_member(&req, event_id, WhitelistKind::Reviewers, user_id)
        .await
}

pub async fn list_event_reviewers(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE
        .list_whitelist_members(&req, path.into_inner(), WhitelistKind::Reviewers)
        .await
}

// ==================== 评审者-教师指派 ====================

pub async fn add_assignment(
    req: HttpRequest,
    body: web::Json<ReviewerTeacherRequest>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.add_assignment(&req, body.into_inner()).await
}

pub async fn remove_assignment(
    req: HttpRequest,
    body: web::Json<ReviewerTeacherRequest>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.remove_assignment(&req, body.into_inner()).await
}

pub async fn list_assignments(
    req: HttpRequest,
    path: web::Path<i64>, // reviewer_id
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.list_assignments(&req, path.into_inner()).await
}

// 配置路由（管理操作在服务层校验管理员角色）
pub fn configure_event_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/events")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_events))
            .route("", web::post().to(create_event))
            .route("/{id}", web::get().to(get_event))
            .route("/{id}", web::put().to(update_event))
            .route("/{id}", web::delete().to(delete_event))
            .route("/{id}/windows", web::get().to(get_event_windows))
            .route("/{id}/teachers", web::get().to(list_event_teachers))
            .route("/{id}/teachers", web::post().to(add_event_teacher))
            .route(
                "/{id}/teachers/{user_id}",
                web::delete().to(remove_event_teacher),
            )
            .route("/{id}/reviewers", web::get().to(list_event_reviewers))
            .route("/{id}/reviewers", web::post().to(add_event_reviewer))
            .route(
                "/{id}/reviewers/{user_id}",
                web::delete().to(remove_event_reviewer),
            ),
    );

    // 评审者-教师指派独立于单个活动
    cfg.service(
        web::scope("/api/v1/assignments")
            .wrap(middlewares::RequireJWT)
            .route("", web::post().to(add_assignment))
            .route("", web::delete().to(remove_assignment))
            .route("/{reviewer_id}", web::get().to(list_assignments)),
    );
}
