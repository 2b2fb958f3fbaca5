use super::UserService;
use crate::errors::{Result, TutorError};
use crate::models::users::entities::User;

pub async fn get_user(service: &UserService, user_id: i64) -> Result<User> {
    service
        .ctx
        .storage
        .get_user_by_id(user_id)
        .await?
        .ok_or_else(|| TutorError::not_found("User not found"))
}
