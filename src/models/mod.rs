pub mod auth;
pub mod common;
pub mod content;
pub mod documents;
pub mod events;
pub mod reviews;
pub mod system;
pub mod templates;
pub mod users;

pub use common::error_code::ErrorCode;
pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

/// 程序启动时间，注入到 app data 供系统状态接口使用
#[derive(Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
