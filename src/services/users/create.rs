use tracing::info;

use super::UserService;
use crate::errors::{Result, TutorError};
use crate::models::users::{entities::User, requests::CreateUserRequest};
use crate::utils::{validate_email, validate_name};

pub async fn create_user(service: &UserService, req: CreateUserRequest) -> Result<User> {
    let storage = &service.ctx.storage;

    let name = req.name.trim().to_string();
    validate_name(&name).map_err(TutorError::validation)?;

    let email = req.email.trim().to_lowercase();
    validate_email(&email).map_err(TutorError::validation)?;

    if storage.get_user_by_email(&email).await?.is_some() {
        return Err(TutorError::conflict("Email already registered"));
    }

    let user = storage
        .create_user(CreateUserRequest {
            name,
            email,
            role: req.role,
        })
        .await?;
    info!("User {} created with role {}", user.id, user.role);

    Ok(user)
}
