use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TemplateService;
use crate::middlewares::RequireJWT;
use crate::models::templates::requests::{DimensionInput, ReplaceDimensionsRequest};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

/// 权重总和允许的偏差
const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// 批量编辑模板维度（管理员）
/// PUT /templates/{id}/dimensions
///
/// 整组替换：旧维度全部删除后按新列表重建，顺序即列表顺序。
/// 权重总和必须等于 1.0 ± 0.01；被启用中活动引用的模板不可编辑。
pub async fn replace_dimensions(
    service: &TemplateService,
    request: &HttpRequest,
    template_id: i64,
    req: ReplaceDimensionsRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let uid = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    // 管理员专属操作
    if RequireJWT::extract_user_role(request) != Some(UserRole::Admin) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只有管理员可以执行此操作",
        )));
    }

    // 被启用中活动引用的模板维度不可变
    match storage.count_events_for_template(template_id, true).await {
        Ok(0) => {}
        Ok(n) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::TemplateInUse,
                format!("模板正被 {n} 个启用中的活动引用，维度不可修改"),
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询活动引用失败: {e}"),
                )),
            );
        }
    }

    if let Err(msg) = check_dimension_set(&req.dimensions) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::DimensionWeightInvalid,
            msg,
        )));
    }

    match storage
        .replace_template_dimensions(template_id, req.dimensions)
        .await
    {
        Ok(Some(template)) => {
            info!(
                "Template {} dimensions replaced by admin {}",
                template_id, uid
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(template, "维度更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TemplateNotFound,
            "模板不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("更新维度失败: {e}"),
            )),
        ),
    }
}

/// 批量编辑的维度集合校验
///
/// 单条创建不约束权重总和；只有这个管理端批量入口要求
/// |Σ weights − 1.0| ≤ 0.01。
pub(crate) fn check_dimension_set(dimensions: &[DimensionInput]) -> Result<(), String> {
    if dimensions.is_empty() {
        return Err("维度列表不能为空".to_string());
    }

    for dim in dimensions {
        if dim.name.trim().is_empty() {
            return Err("维度名称不能为空".to_string());
        }
        if !dim.weight.is_finite() || dim.weight < 0.0 {
            return Err(format!("维度 \"{}\" 的权重无效", dim.name));
        }
    }

    let sum: f64 = dimensions.iter().map(|d| d.weight).sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(format!("权重总和必须等于 1.0（当前为 {sum:.2}）"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dim(name: &str, weight: f64) -> DimensionInput {
        DimensionInput {
            name: name.to_string(),
            weight,
        }
    }

    #[test]
    fn test_accepts_exact_sum() {
        assert!(check_dimension_set(&[dim("A", 0.6), dim("B", 0.4)]).is_ok());
    }

    #[test]
    fn test_accepts_sum_within_tolerance() {
        assert!(check_dimension_set(&[dim("A", 0.5), dim("B", 0.505)]).is_ok());
        assert!(check_dimension_set(&[dim("A", 0.5), dim("B", 0.495)]).is_ok());
    }

    #[test]
    fn test_rejects_sum_outside_tolerance() {
        assert!(check_dimension_set(&[dim("A", 0.5), dim("B", 0.52)]).is_err());
        assert!(check_dimension_set(&[dim("A", 0.5), dim("B", 0.3)]).is_err());
    }

    #[test]
    fn test_rejects_empty_set() {
        assert!(check_dimension_set(&[]).is_err());
    }

    #[test]
    fn test_rejects_invalid_weight() {
        assert!(check_dimension_set(&[dim("A", -0.2), dim("B", 1.2)]).is_err());
        assert!(check_dimension_set(&[dim("A", f64::NAN), dim("B", 1.0)]).is_err());
    }

    #[test]
    fn test_rejects_blank_name() {
        assert!(check_dimension_set(&[dim("  ", 1.0)]).is_err());
    }
}
