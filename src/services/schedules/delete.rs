use tracing::info;

use super::{MSG_SCHEDULE_NOT_FOUND, ScheduleService};
use crate::cache::ScheduleView;
use crate::errors::{Result, TutorError};

pub async fn delete_schedule(
    service: &ScheduleService,
    schedule_id: i64,
    teacher_user_id: i64,
) -> Result<()> {
    let ctx = &service.ctx;

    let teacher = ctx
        .storage
        .get_teacher_by_user_id(teacher_user_id)
        .await?
        .ok_or_else(|| TutorError::not_found(MSG_SCHEDULE_NOT_FOUND))?;

    let schedule = ctx
        .storage
        .get_schedule_by_id_and_teacher(schedule_id, teacher.id)
        .await?
        .ok_or_else(|| TutorError::not_found(MSG_SCHEDULE_NOT_FOUND))?;

    if !ctx.storage.delete_schedule(schedule.id, teacher.id).await? {
        return Err(TutorError::not_found(MSG_SCHEDULE_NOT_FOUND));
    }

    info!("Schedule {} deleted by teacher {}", schedule_id, teacher.id);

    let mut views = vec![ScheduleView::Teacher(teacher_user_id), ScheduleView::All];
    if let Some(student_id) = schedule.student_id
        && let Some(student) = ctx.storage.get_student_by_id(student_id).await?
    {
        views.push(ScheduleView::Student(student.user_id));
    }
    ctx.schedule_views.invalidate(&views).await;

    Ok(())
}
