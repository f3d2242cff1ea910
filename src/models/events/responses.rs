use super::entities::{ReviewEvent, ReviewWindowStatus};
use crate::models::common::PaginationInfo;
use crate::models::users::entities::User;
use serde::Serialize;
use ts_rs::TS;

// 活动列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct EventListResponse {
    pub items: Vec<ReviewEvent>,
    pub pagination: PaginationInfo,
}

// 活动时间窗口探测响应
#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct EventWindowsResponse {
    pub upload_open: bool,
    pub review_window: ReviewWindowStatus,
}

// 白名单成员列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct WhitelistResponse {
    pub items: Vec<User>,
}
