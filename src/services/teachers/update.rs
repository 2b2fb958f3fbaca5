use super::{TeacherService, normalize_subjects};
use crate::errors::{Result, TutorError};
use crate::models::teachers::entities::Teacher;

pub async fn update_teachable_subjects(
    service: &TeacherService,
    teacher_user_id: i64,
    teachable_subjects: &str,
) -> Result<Teacher> {
    let storage = &service.ctx.storage;

    let subjects = normalize_subjects(teachable_subjects)
        .ok_or_else(|| TutorError::validation("Teachable subjects are required"))?;

    let teacher = storage
        .get_teacher_by_user_id(teacher_user_id)
        .await?
        .ok_or_else(|| TutorError::not_found("Teacher not found"))?;

    storage
        .update_teachable_subjects(teacher.id, &subjects)
        .await?
        .ok_or_else(|| TutorError::not_found("Teacher not found"))
}
