use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::system::requests::UpdateGlobalTemplateRequest;
use crate::services::SystemService;

// 懒加载的全局 SystemService 实例
static SYSTEM_SERVICE: Lazy<SystemService> = Lazy::new(SystemService::new_lazy);

// 系统状态
pub async fn get_status(req: HttpRequest) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.get_status(&req).await
}

// 读取全局默认模板设置
pub async fn get_global_template(req: HttpRequest) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.get_global_template(&req).await
}

// 更新全局默认模板设置
pub async fn update_global_template(
    req: HttpRequest,
    body: web::Json<UpdateGlobalTemplateRequest>,
) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE
        .update_global_template(&req, body.into_inner())
        .await
}

// 配置路由（设置写入在服务层校验管理员角色）
pub fn configure_system_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/system")
            .wrap(middlewares::RequireJWT)
            .route("/status", web::get().to(get_status))
            .route("/global-template", web::get().to(get_global_template))
            .route("/global-template", web::put().to(update_global_template)),
    );
}
