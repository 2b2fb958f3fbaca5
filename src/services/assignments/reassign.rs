use tracing::{info, warn};

use super::AssignmentService;
use super::MSG_STUDENTS_REQUIRED;
use super::matching::{matching_label, matching_subjects};
use crate::cache::ScheduleView;
use crate::errors::{Result, TutorError};
use crate::models::assignments::{entities::ReassignCheck, responses::ReassignmentResult};
use crate::services::notifications::{StudentAssignmentEmail, TeacherAssignmentEmail};
use crate::utils::validate::dedup_ids;

pub const MSG_DOUBLE_BOOK: &str = "Reassignment would double-book the target teacher";

/// 转移学生
///
/// 分配的删除、新建以及课程改挂在同一事务内完成，任何一步失败整体回滚。
/// 通知在提交之后发送，失败不影响结果。
pub async fn reassign_students(
    service: &AssignmentService,
    from_teacher_id: i64,
    to_teacher_id: i64,
    student_ids: &[i64],
) -> Result<ReassignmentResult> {
    if student_ids.is_empty() {
        return Err(TutorError::validation(MSG_STUDENTS_REQUIRED));
    }
    if from_teacher_id == to_teacher_id {
        return Err(TutorError::validation(
            "Source and target teacher must be different",
        ));
    }

    let ctx = &service.ctx;
    let from_teacher = ctx
        .storage
        .get_teacher_by_id(from_teacher_id)
        .await?
        .ok_or_else(|| TutorError::not_found("Source teacher not found"))?;
    let to_teacher = ctx
        .storage
        .get_teacher_by_id(to_teacher_id)
        .await?
        .ok_or_else(|| TutorError::not_found("Target teacher not found"))?;

    // 只转移当前确实分配给原教师的学生
    let assigned = ctx
        .storage
        .list_assigned_student_ids(from_teacher.id, &dedup_ids(student_ids))
        .await?;
    if assigned.is_empty() {
        return Err(TutorError::validation(
            "None of the selected students are assigned to the source teacher",
        ));
    }

    let locks = ctx.guard.lock_teachers(from_teacher.id, to_teacher.id).await;
    let check = ctx
        .storage
        .reassign_students(
            from_teacher.id,
            to_teacher.id,
            &assigned,
            ctx.guard.is_strict(),
        )
        .await
        .map_err(|e| {
            TutorError::upstream(format!("Failed to reassign students: {}", e.message()))
        })?;
    drop(locks);

    let outcome = match check {
        ReassignCheck::Committed(outcome) => outcome,
        ReassignCheck::WouldDoubleBook => {
            warn!(
                "Reassignment from teacher {} to {} rejected: target calendar collision",
                from_teacher.id, to_teacher.id
            );
            return Err(TutorError::conflict(MSG_DOUBLE_BOOK));
        }
    };

    info!(
        "Reassigned {} student(s) from teacher {} to {}, {} session(s) moved",
        outcome.moved, from_teacher.id, to_teacher.id, outcome.rescheduled
    );

    // 以下均在提交之后，失败只记录日志
    let students = match ctx.storage.get_students_with_subjects(&assigned).await {
        Ok(students) => students,
        Err(e) => {
            warn!("Failed to load reassigned students for notification: {}", e);
            Vec::new()
        }
    };

    let mut views = vec![
        ScheduleView::Teacher(from_teacher.user_id),
        ScheduleView::Teacher(to_teacher.user_id),
        ScheduleView::All,
    ];
    views.extend(
        students
            .iter()
            .map(|s| ScheduleView::Student(s.student.user_id)),
    );
    ctx.schedule_views.invalidate(&views).await;

    if !students.is_empty() {
        ctx.notifications
            .teacher_assigned(TeacherAssignmentEmail {
                to: to_teacher.email.clone(),
                teacher_name: to_teacher.name.clone(),
                student_names: students.iter().map(|s| s.student.name.clone()).collect(),
                teachable_subjects: to_teacher.teachable_subjects.clone(),
                reassigned: true,
            })
            .await;

        let emails = students
            .into_iter()
            .map(|s| {
                let matches = matching_subjects(&to_teacher.teachable_subjects, &s.subjects);
                StudentAssignmentEmail {
                    to: s.student.email,
                    student_name: s.student.name,
                    teacher_name: to_teacher.name.clone(),
                    teacher_email: to_teacher.email.clone(),
                    matching_subjects: matching_label(&matches),
                    reassigned: true,
                }
            })
            .collect();
        ctx.notifications.students_assigned(emails).await;
    }

    Ok(ReassignmentResult {
        success: true,
        count: student_ids.len() as u64,
        moved: outcome.moved,
        rescheduled: outcome.rescheduled,
    })
}
