use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::templates::requests::{
    CreateTemplateRequest, ReplaceDimensionsRequest, TemplateListQuery, UpdateTemplateRequest,
};
use crate::services::TemplateService;

// 懒加载的全局 TemplateService 实例
static TEMPLATE_SERVICE: Lazy<TemplateService> = Lazy::new(TemplateService::new_lazy);

// 列出模板
pub async fn list_templates(
    req: HttpRequest,
    query: web::Query<TemplateListQuery>,
) -> ActixResult<HttpResponse> {
    TEMPLATE_SERVICE.list_templates(&req, query.into_inner()).await
}

// 创建模板
pub async fn create_template(
    req: HttpRequest,
    body: web::Json<CreateTemplateRequest>,
) -> ActixResult<HttpResponse> {
    TEMPLATE_SERVICE.create_template(&req, body.into_inner()).await
}

// 获取模板详情（评审者打分界面也需要维度信息）
pub async fn get_template(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    TEMPLATE_SERVICE.get_template(&req, path.into_inner()).await
}

// 更新模板基础信息
pub async fn update_template(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateTemplateRequest>,
) -> ActixResult<HttpResponse> {
    TEMPLATE_SERVICE
        .update_template(&req, path.into_inner(), body.into_inner())
        .await
}

// 批量编辑维度
pub async fn replace_dimensions(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<ReplaceDimensionsRequest>,
) -> ActixResult<HttpResponse> {
    TEMPLATE_SERVICE
        .replace_dimensions(&req, path.into_inner(), body.into_inner())
        .await
}

// 删除模板
pub async fn delete_template(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    TEMPLATE_SERVICE.delete_template(&req, path.into_inner()).await
}

// 配置路由（写操作在服务层校验管理员角色）
pub fn configure_template_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/templates")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_templates))
            .route("", web::post().to(create_template))
            .route("/{id}", web::get().to(get_template))
            .route("/{id}", web::put().to(update_template))
            .route("/{id}", web::delete().to(delete_template))
            .route("/{id}/dimensions", web::put().to(replace_dimensions)),
    );
}
