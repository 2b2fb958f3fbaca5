use serde::Deserialize;
use ts_rs::TS;

use super::entities::UserRole;

// 创建用户请求（身份由外部认证服务签发，这里只登记资料）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

// 同步订阅状态（由支付服务回调后台调用）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UpdateSubscriptionRequest {
    pub status: String,
    pub current_period_end: Option<chrono::DateTime<chrono::Utc>>,
}
