pub mod create;
pub mod get;
pub mod subscription;

use crate::errors::Result;
use crate::models::{
    subjects::entities::Subscription,
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateSubscriptionRequest},
    },
};
use crate::services::ServiceContext;

pub struct UserService {
    ctx: ServiceContext,
}

impl UserService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    // 登记用户（身份由外部认证服务签发）
    pub async fn create_user(&self, req: CreateUserRequest) -> Result<User> {
        create::create_user(self, req).await
    }

    pub async fn get_user(&self, user_id: i64) -> Result<User> {
        get::get_user(self, user_id).await
    }

    // 写入支付方同步过来的订阅状态
    pub async fn set_subscription(
        &self,
        user_id: i64,
        req: UpdateSubscriptionRequest,
    ) -> Result<Subscription> {
        subscription::set_subscription(self, user_id, req).await
    }
}
