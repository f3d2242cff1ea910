use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::content::requests::{CreateContentRequest, UpdateContentRequest};
use crate::services::ContentService;
use crate::services::content::ContentKind;

// 懒加载的全局 ContentService 实例
static CONTENT_SERVICE: Lazy<ContentService> = Lazy::new(ContentService::new_lazy);

macro_rules! content_handlers {
    ($list:ident, $create:ident, $update:ident, $delete:ident, $kind:expr) => {
        pub async fn $list(req: HttpRequest) -> ActixResult<HttpResponse> {
            CONTENT_SERVICE.list_items(&req, $kind).await
        }

        pub async fn $create(
            req: HttpRequest,
            body: web::Json<CreateContentRequest>,
        ) -> ActixResult<HttpResponse> {
            CONTENT_SERVICE
                .create_item(&req, $kind, body.into_inner())
                .await
        }

        pub async fn $update(
            req: HttpRequest,
            path: web::Path<i64>,
            body: web::Json<UpdateContentRequest>,
        ) -> ActixResult<HttpResponse> {
            CONTENT_SERVICE
                .update_item(&req, $kind, path.into_inner(), body.into_inner())
                .await
        }

        pub async fn $delete(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
            CONTENT_SERVICE
                .delete_item(&req, $kind, path.into_inner())
                .await
        }
    };
}

content_handlers!(
    list_announcements,
    create_announcement,
    update_announcement,
    delete_announcement,
    ContentKind::Announcements
);

content_handlers!(
    list_instructions,
    create_instruction,
    update_instruction,
    delete_instruction,
    ContentKind::Instructions
);

// 配置路由（写操作在服务层校验管理员角色）
pub fn configure_content_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/announcements")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_announcements))
            .route("", web::post().to(create_announcement))
            .route("/{id}", web::put().to(update_announcement))
            .route("/{id}", web::delete().to(delete_announcement)),
    );

    cfg.service(
        web::scope("/api/v1/instructions")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_instructions))
            .route("", web::post().to(create_instruction))
            .route("/{id}", web::put().to(update_instruction))
            .route("/{id}", web::delete().to(delete_instruction)),
    );
}
