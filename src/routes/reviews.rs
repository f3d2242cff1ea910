use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::models::reviews::requests::SubmitReviewRequest;
use crate::services::ReviewService;

// 懒加载的全局 ReviewService 实例
static REVIEW_SERVICE: Lazy<ReviewService> = Lazy::new(ReviewService::new_lazy);

// 提交/重提评审
pub async fn submit_review(
    req: HttpRequest,
    path: web::Path<i64>, // document_id
    body: web::Json<SubmitReviewRequest>,
) -> ActixResult<HttpResponse> {
    REVIEW_SERVICE
        .submit_review(&req, path.into_inner(), body.into_inner())
        .await
}

// 获取我对某文档的评审
pub async fn get_my_review(
    req: HttpRequest,
    path: web::Path<i64>, // document_id
) -> ActixResult<HttpResponse> {
    REVIEW_SERVICE.get_my_review(&req, path.into_inner()).await
}

// 列出文档的全部评审
pub async fn list_document_reviews(
    req: HttpRequest,
    path: web::Path<i64>, // document_id
) -> ActixResult<HttpResponse> {
    REVIEW_SERVICE
        .list_document_reviews(&req, path.into_inner())
        .await
}

// 列出我的全部评审
pub async fn list_my_reviews(req: HttpRequest) -> ActixResult<HttpResponse> {
    REVIEW_SERVICE.list_my_reviews(&req).await
}

// 配置路由
pub fn configure_review_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/reviews")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/documents/{id}")
                    .wrap(RateLimit::review_submit())
                    .route(web::post().to(submit_review)),
            )
            .route("/documents/{id}/my", web::get().to(get_my_review))
            .route("/documents/{id}/all", web::get().to(list_document_reviews))
            .route("/my", web::get().to(list_my_reviews)),
    );
}
