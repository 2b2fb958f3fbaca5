use tracing::info;

use super::SubjectService;
use crate::errors::{Result, TutorError};
use crate::models::subjects::responses::EnrollmentResponse;

pub const MSG_SUBSCRIPTION_REQUIRED: &str = "An active subscription is required to enroll";
pub const MSG_ALREADY_ENROLLED: &str = "Already enrolled in this subject";

pub async fn enroll(
    service: &SubjectService,
    student_user_id: i64,
    subject_id: i64,
) -> Result<EnrollmentResponse> {
    let storage = &service.ctx.storage;

    let student = storage
        .get_student_by_user_id(student_user_id)
        .await?
        .ok_or_else(|| TutorError::not_found("Student not found"))?;

    let subscribed = storage
        .get_subscription_by_student_id(student.id)
        .await?
        .is_some_and(|s| s.is_active());
    if !subscribed {
        return Err(TutorError::validation(MSG_SUBSCRIPTION_REQUIRED));
    }

    let subject = storage
        .get_subject_by_id(subject_id)
        .await?
        .ok_or_else(|| TutorError::not_found("Subject not found"))?;

    if storage.get_enrollment(student.id, subject.id).await?.is_some() {
        return Err(TutorError::conflict(MSG_ALREADY_ENROLLED));
    }

    let enrollment = storage.create_enrollment(student.id, subject.id).await?;
    info!("Student {} enrolled in subject {}", student.id, subject.name);

    Ok(EnrollmentResponse {
        enrollment,
        subject,
    })
}
