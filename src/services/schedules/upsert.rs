use chrono::Timelike;
use tracing::{debug, info};

use super::{
    MSG_CREATE_CONFLICT, MSG_INVALID_RANGE, MSG_SCHEDULE_NOT_FOUND, MSG_SUBSECOND_TIME,
    MSG_UPDATE_CONFLICT, ScheduleService,
};
use crate::cache::ScheduleView;
use crate::errors::{Result, TutorError};
use crate::models::schedules::entities::{ScheduleDetail, ScheduleSaveOutcome, ScheduleWrite};
use crate::services::notifications::{CalendarLinks, ClassScheduledEmail};

fn conflict_error(is_update: bool) -> TutorError {
    if is_update {
        TutorError::conflict(MSG_UPDATE_CONFLICT)
    } else {
        TutorError::conflict(MSG_CREATE_CONFLICT)
    }
}

pub async fn upsert_schedule(
    service: &ScheduleService,
    mut write: ScheduleWrite,
) -> Result<ScheduleDetail> {
    // 存储精度为秒，带毫秒的时间会在落库时被截断
    if write.start_time.nanosecond() != 0 || write.end_time.nanosecond() != 0 {
        return Err(TutorError::validation(MSG_SUBSECOND_TIME));
    }
    if write.start_time >= write.end_time {
        return Err(TutorError::validation(MSG_INVALID_RANGE));
    }
    write.title = write
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    let ctx = &service.ctx;
    let storage = &ctx.storage;
    let is_update = write.is_update();

    // 严格模式下持有教师锁直到写入完成
    let _teacher_lock = ctx.guard.lock_teacher(write.teacher_id).await;

    if service
        .has_conflict(
            write.teacher_id,
            write.start_time,
            write.end_time,
            write.schedule_id,
        )
        .await?
    {
        debug!(
            "Rejected schedule for teacher {} ({} - {}): overlap",
            write.teacher_id, write.start_time, write.end_time
        );
        return Err(conflict_error(is_update));
    }

    // 更新时学生保持不变，以现有记录为准
    if let Some(schedule_id) = write.schedule_id {
        let existing = storage
            .get_schedule_by_id_and_teacher(schedule_id, write.teacher_id)
            .await?
            .ok_or_else(|| TutorError::not_found(MSG_SCHEDULE_NOT_FOUND))?;
        write.student_id = existing.student_id;
    }

    let teacher = storage
        .get_teacher_by_id(write.teacher_id)
        .await?
        .ok_or_else(|| TutorError::not_found("Teacher not found"))?;

    let student = match write.student_id {
        Some(student_id) => Some(
            storage
                .get_student_by_id(student_id)
                .await?
                .ok_or_else(|| TutorError::not_found("Student not found"))?,
        ),
        None => None,
    };

    let subject = match write.subject_id {
        Some(subject_id) => Some(
            storage
                .get_subject_by_id(subject_id)
                .await?
                .ok_or_else(|| TutorError::not_found("Subject not found"))?,
        ),
        None => None,
    };

    let schedule = match storage
        .save_schedule(write, ctx.guard.is_strict())
        .await?
    {
        ScheduleSaveOutcome::Saved(schedule) => schedule,
        ScheduleSaveOutcome::Conflict => return Err(conflict_error(is_update)),
        ScheduleSaveOutcome::NotFound => {
            return Err(TutorError::not_found(MSG_SCHEDULE_NOT_FOUND));
        }
    };

    if is_update {
        info!("Schedule {} updated by teacher {}", schedule.id, teacher.id);
    } else {
        info!("Schedule {} created for teacher {}", schedule.id, teacher.id);
    }

    let mut views = vec![ScheduleView::Teacher(teacher.user_id), ScheduleView::All];
    if let Some(student) = &student {
        views.push(ScheduleView::Student(student.user_id));
    }
    ctx.schedule_views.invalidate(&views).await;

    let detail = ScheduleDetail {
        schedule,
        teacher_name: teacher.name,
        student_name: student.as_ref().map(|s| s.name.clone()),
        subject_name: subject.map(|s| s.name),
    };

    // 只在新建时通知学生
    if !is_update && let Some(student) = student {
        let calendar = ctx.notifications.calendar_links_enabled().then(|| {
            let title = detail
                .schedule
                .title
                .clone()
                .or_else(|| detail.subject_name.clone())
                .unwrap_or_else(|| "Tutoring session".to_string());
            let details = format!("Session with {}", detail.teacher_name);
            CalendarLinks::build(
                &title,
                &details,
                detail.schedule.start_time,
                detail.schedule.end_time,
            )
        });

        ctx.notifications
            .class_scheduled(ClassScheduledEmail {
                to: student.email,
                student_name: student.name,
                teacher_name: detail.teacher_name.clone(),
                subject_name: detail.subject_name.clone(),
                title: detail.schedule.title.clone(),
                start_time: detail.schedule.start_time,
                end_time: detail.schedule.end_time,
                calendar,
            })
            .await;
    }

    Ok(detail)
}
