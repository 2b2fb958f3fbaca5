use super::AssignmentService;
use super::matching::annotate;
use crate::errors::{Result, TutorError};
use crate::models::assignments::responses::TeacherStudentsResponse;

pub async fn get_teacher_students(
    service: &AssignmentService,
    teacher_user_id: i64,
) -> Result<TeacherStudentsResponse> {
    let storage = &service.ctx.storage;
    let teacher = storage
        .get_teacher_by_user_id(teacher_user_id)
        .await?
        .ok_or_else(|| TutorError::not_found("Teacher not found"))?;

    let students = storage
        .list_assigned_students(teacher.id)
        .await?
        .into_iter()
        .map(|student| annotate(&teacher.teachable_subjects, student))
        .collect();

    Ok(TeacherStudentsResponse {
        teacher_id: teacher.id,
        students,
    })
}
