use tracing::info;

use super::{TeacherService, normalize_subjects};
use crate::errors::{Result, TutorError};
use crate::models::teachers::{entities::Teacher, requests::TeacherApplicationRequest};
use crate::models::users::entities::UserRole;

pub async fn apply(
    service: &TeacherService,
    user_id: i64,
    mut req: TeacherApplicationRequest,
) -> Result<Teacher> {
    let storage = &service.ctx.storage;

    let user = storage
        .get_user_by_id(user_id)
        .await?
        .ok_or_else(|| TutorError::not_found("User not found"))?;
    if user.role != UserRole::Teacher {
        return Err(TutorError::validation(
            "Only teacher accounts can submit an application",
        ));
    }

    req.teachable_subjects = normalize_subjects(&req.teachable_subjects)
        .ok_or_else(|| TutorError::validation("Teachable subjects are required"))?;
    req.bio = req
        .bio
        .map(|b| b.trim().to_string())
        .filter(|b| !b.is_empty());

    if storage.get_teacher_by_user_id(user.id).await?.is_some() {
        return Err(TutorError::conflict("Teacher application already exists"));
    }

    let teacher = storage.create_teacher_application(user.id, req).await?;
    info!("Teacher application {} submitted by user {}", teacher.id, user.id);

    Ok(teacher)
}
