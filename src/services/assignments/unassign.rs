use tracing::info;

use super::AssignmentService;
use crate::errors::{Result, TutorError};

pub async fn unassign_student(
    service: &AssignmentService,
    teacher_id: i64,
    student_id: i64,
) -> Result<()> {
    if !service
        .ctx
        .storage
        .delete_assignment(teacher_id, student_id)
        .await?
    {
        return Err(TutorError::not_found("Assignment not found"));
    }

    info!("Student {} unassigned from teacher {}", student_id, teacher_id);
    Ok(())
}
