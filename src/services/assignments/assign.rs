use tracing::info;

use super::matching::{matching_label, matching_subjects};
use super::{AssignmentService, MSG_STUDENTS_REQUIRED, MSG_TEACHER_REQUIRED};
use crate::errors::{Result, TutorError};
use crate::models::assignments::responses::AssignmentResult;
use crate::services::notifications::{StudentAssignmentEmail, TeacherAssignmentEmail};
use crate::utils::validate::dedup_ids;

pub async fn assign_students(
    service: &AssignmentService,
    teacher_id: Option<i64>,
    student_ids: &[i64],
) -> Result<AssignmentResult> {
    let teacher_id = teacher_id.ok_or_else(|| TutorError::validation(MSG_TEACHER_REQUIRED))?;
    if student_ids.is_empty() {
        return Err(TutorError::validation(MSG_STUDENTS_REQUIRED));
    }

    let ctx = &service.ctx;
    let teacher = ctx
        .storage
        .get_teacher_by_id(teacher_id)
        .await?
        .ok_or_else(|| TutorError::not_found("Teacher not found"))?;

    // 不存在的学生 ID 直接忽略
    let students = ctx
        .storage
        .get_students_with_subjects(&dedup_ids(student_ids))
        .await?;
    let known_ids: Vec<i64> = students.iter().map(|s| s.student.id).collect();

    let count = ctx.storage.create_assignments(teacher.id, &known_ids).await?;
    info!(
        "Assigned {} new student(s) to teacher {} ({} requested)",
        count,
        teacher.id,
        student_ids.len()
    );

    if !students.is_empty() {
        ctx.notifications
            .teacher_assigned(TeacherAssignmentEmail {
                to: teacher.email.clone(),
                teacher_name: teacher.name.clone(),
                student_names: students.iter().map(|s| s.student.name.clone()).collect(),
                teachable_subjects: teacher.teachable_subjects.clone(),
                reassigned: false,
            })
            .await;

        let emails = students
            .into_iter()
            .map(|s| {
                let matches = matching_subjects(&teacher.teachable_subjects, &s.subjects);
                StudentAssignmentEmail {
                    to: s.student.email,
                    student_name: s.student.name,
                    teacher_name: teacher.name.clone(),
                    teacher_email: teacher.email.clone(),
                    matching_subjects: matching_label(&matches),
                    reassigned: false,
                }
            })
            .collect();
        ctx.notifications.students_assigned(emails).await;
    }

    Ok(AssignmentResult {
        success: true,
        count,
    })
}
