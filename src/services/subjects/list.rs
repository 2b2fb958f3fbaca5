use super::SubjectService;
use crate::errors::{Result, TutorError};
use crate::models::subjects::responses::SubjectListResponse;

pub async fn list_subjects(service: &SubjectService) -> Result<SubjectListResponse> {
    let items = service.ctx.storage.list_subjects().await?;
    Ok(SubjectListResponse { items })
}

pub async fn list_enrollments(
    service: &SubjectService,
    student_user_id: i64,
) -> Result<SubjectListResponse> {
    let storage = &service.ctx.storage;

    let student = storage
        .get_student_by_user_id(student_user_id)
        .await?
        .ok_or_else(|| TutorError::not_found("Student not found"))?;

    let items = storage.list_student_subjects(student.id).await?;
    Ok(SubjectListResponse { items })
}
