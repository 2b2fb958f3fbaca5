use super::AssignmentService;
use super::matching::rank_students;
use crate::errors::{Result, TutorError};
use crate::models::assignments::responses::UnassignedStudentsResponse;

pub async fn get_unassigned_students(
    service: &AssignmentService,
    teacher_id: i64,
) -> Result<UnassignedStudentsResponse> {
    let storage = &service.ctx.storage;
    let teacher = storage
        .get_teacher_by_id(teacher_id)
        .await?
        .ok_or_else(|| TutorError::not_found("Teacher not found"))?;

    let students = storage.list_unassigned_students(teacher.id).await?;

    Ok(UnassignedStudentsResponse {
        teacher_id: teacher.id,
        students: rank_students(&teacher.teachable_subjects, students),
    })
}
