//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码、类型名称以及 HTTP 状态映射。

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use crate::models::{ApiResponse, ErrorCode};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_tutor_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum TutorError {
            $($variant(String),)*
        }

        impl TutorError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(TutorError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(TutorError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(TutorError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl TutorError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        TutorError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_tutor_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    DatabaseConfig("E002", "Database Configuration Error"),
    DatabaseConnection("E003", "Database Connection Error"),
    DatabaseOperation("E004", "Database Operation Error"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    Conflict("E007", "Conflict Error"),
    Upstream("E008", "Upstream Error"),
    Serialization("E009", "Serialization Error"),
    Notification("E010", "Notification Error"),
    Authentication("E011", "Authentication Error"),
    Authorization("E012", "Authorization Error"),
}

impl TutorError {
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

    /// 对应的 API 业务错误码
    pub fn api_code(&self) -> ErrorCode {
        match self {
            TutorError::Validation(_) => ErrorCode::BadRequest,
            TutorError::NotFound(_) => ErrorCode::NotFound,
            TutorError::Conflict(_) => ErrorCode::Conflict,
            TutorError::Authentication(_) => ErrorCode::Unauthorized,
            TutorError::Authorization(_) => ErrorCode::Forbidden,
            TutorError::Upstream(_) => ErrorCode::UpstreamFailed,
            _ => ErrorCode::InternalServerError,
        }
    }

    /// 是否属于调用方可见的业务错误（而非内部故障）
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            TutorError::Validation(_)
                | TutorError::NotFound(_)
                | TutorError::Conflict(_)
                | TutorError::Authentication(_)
                | TutorError::Authorization(_)
        )
    }
}

impl fmt::Display for TutorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for TutorError {}

// 路由层直接 `?` 返回，统一输出 ApiResponse
impl ResponseError for TutorError {
    fn status_code(&self) -> StatusCode {
        match self {
            TutorError::Validation(_) => StatusCode::BAD_REQUEST,
            TutorError::NotFound(_) => StatusCode::NOT_FOUND,
            TutorError::Conflict(_) => StatusCode::CONFLICT,
            TutorError::Authentication(_) => StatusCode::UNAUTHORIZED,
            TutorError::Authorization(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(ApiResponse::error_empty(self.api_code(), self.message()))
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for TutorError {
    fn from(err: sea_orm::DbErr) -> Self {
        TutorError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for TutorError {
    fn from(err: serde_json::Error) -> Self {
        TutorError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TutorError>;
