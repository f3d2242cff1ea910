//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_docreview_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum DocReviewError {
            $($variant(String),)*
        }

        impl DocReviewError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(DocReviewError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(DocReviewError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(DocReviewError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl DocReviewError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        DocReviewError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_docreview_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    DateParse("E010", "Date Parse Error"),
    Authentication("E011", "Authentication Error"),
    Permission("E012", "Permission Error"),
    WindowClosed("E013", "Review Window Closed"),
    Confirmation("E014", "Confirmation Mismatch"),
    Conflict("E015", "Conflict Error"),
}

impl DocReviewError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for DocReviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for DocReviewError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for DocReviewError {
    fn from(err: sea_orm::DbErr) -> Self {
        DocReviewError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for DocReviewError {
    fn from(err: std::io::Error) -> Self {
        DocReviewError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for DocReviewError {
    fn from(err: serde_json::Error) -> Self {
        DocReviewError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for DocReviewError {
    fn from(err: chrono::ParseError) -> Self {
        DocReviewError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DocReviewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DocReviewError::cache_connection("test").code(), "E001");
        assert_eq!(DocReviewError::validation("test").code(), "E007");
        assert_eq!(DocReviewError::window_closed("test").code(), "E013");
        assert_eq!(DocReviewError::confirmation("test").code(), "E014");
        assert_eq!(DocReviewError::conflict("test").code(), "E015");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            DocReviewError::permission("test").error_type(),
            "Permission Error"
        );
        assert_eq!(
            DocReviewError::window_closed("test").error_type(),
            "Review Window Closed"
        );
    }

    #[test]
    fn test_error_message() {
        let err = DocReviewError::validation("Invalid score");
        assert_eq!(err.message(), "Invalid score");
    }

    #[test]
    fn test_format_simple() {
        let err = DocReviewError::confirmation("confirmation phrase mismatch");
        let formatted = err.format_simple();
        assert!(formatted.contains("Confirmation Mismatch"));
        assert!(formatted.contains("confirmation phrase mismatch"));
    }
}
