use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use super::EventService;
use crate::middlewares::RequireJWT;
use crate::models::events::requests::DeleteEventRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

/// 删除确认短语，必须逐字符匹配（区分大小写）
const CONFIRM_PHRASE: &str = "DELETE";

/// 确认后级联删除活动（管理员）
/// DELETE /events/{id}
///
/// 必须同时提供活动的准确名称和固定确认短语 "DELETE"；
/// 确认通过后删除不可逆：活动下全部文档、文件、评审与明细一并移除。
pub async fn delete_event(
    service: &EventService,
    request: &HttpRequest,
    event_id: i64,
    req: DeleteEventRequest,
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

    let event = match storage.get_event_by_id(event_id).await {
        Ok(Some(event)) => event,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::EventNotFound,
                "活动不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询活动失败: {e}"),
                )),
            );
        }
    };

    // 双重确认：名称 + 固定短语，任一不符则拒绝且不触碰任何数据
    if let Err(msg) = check_delete_confirmation(&event.name, &req.confirm_name, &req.confirm_phrase)
    {
        warn!(
            "Event {} deletion rejected for admin {}: {}",
            event_id, uid, msg
        );
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::EventConfirmationMismatch,
            msg,
        )));
    }

    match storage.delete_event(event_id).await {
        Ok(Some(file_paths)) => {
            // 数据库级联完成后清理磁盘文件
            for path in &file_paths {
                if !path.is_empty() && Path::new(path).exists() {
                    let _ = fs::remove_file(path);
                }
            }
            info!(
                "Event {} ({}) deleted by admin {} with {} document file(s) removed",
                event_id,
                event.name,
                uid,
                file_paths.len()
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("活动及其全部数据已删除")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::EventNotFound,
            "活动不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("删除活动失败: {e}"),
            )),
        ),
    }
}

/// 破坏性删除的双重确认检查
fn check_delete_confirmation(
    event_name: &str,
    confirm_name: &str,
    confirm_phrase: &str,
) -> Result<(), &'static str> {
    if confirm_name != event_name {
        return Err("活动名称不匹配");
    }
    if confirm_phrase != CONFIRM_PHRASE {
        return Err("确认短语不匹配，请输入 DELETE");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_accepts_exact_match() {
        assert!(check_delete_confirmation("Spring2024", "Spring2024", "DELETE").is_ok());
    }

    #[test]
    fn test_confirmation_rejects_wrong_name() {
        assert!(check_delete_confirmation("Spring2024", "Spring2023", "DELETE").is_err());
        assert!(check_delete_confirmation("Spring2024", "spring2024", "DELETE").is_err());
    }

    #[test]
    fn test_confirmation_phrase_is_case_sensitive() {
        assert!(check_delete_confirmation("Spring2024", "Spring2024", "delete").is_err());
        assert!(check_delete_confirmation("Spring2024", "Spring2024", "Delete").is_err());
        assert!(check_delete_confirmation("Spring2024", "Spring2024", "").is_err());
    }
}
