use tracing::info;

use super::TeacherService;
use crate::errors::{Result, TutorError};
use crate::models::teachers::{
    entities::{Teacher, TeacherStatus},
    requests::ReviewDecision,
};

/// 审核：只有待审核的申请可以通过或拒绝，通过时记录入职时间
pub async fn review(
    service: &TeacherService,
    teacher_id: i64,
    decision: ReviewDecision,
) -> Result<Teacher> {
    let storage = &service.ctx.storage;

    let teacher = storage
        .get_teacher_by_id(teacher_id)
        .await?
        .ok_or_else(|| TutorError::not_found("Teacher application not found"))?;

    if teacher.status != TeacherStatus::Pending {
        return Err(TutorError::validation(
            "Application has already been reviewed",
        ));
    }

    let (status, hire_date) = match decision {
        ReviewDecision::Approve => (TeacherStatus::Approved, Some(chrono::Utc::now())),
        ReviewDecision::Reject => (TeacherStatus::Rejected, None),
    };

    let updated = storage
        .update_teacher_status(teacher.id, status, hire_date)
        .await?
        .ok_or_else(|| TutorError::not_found("Teacher application not found"))?;

    info!("Teacher application {} marked {}", updated.id, updated.status);
    Ok(updated)
}
