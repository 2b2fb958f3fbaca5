use tracing::debug;

use super::ScheduleService;
use crate::cache::ScheduleView;
use crate::errors::Result;
use crate::models::schedules::entities::{ScheduleDetail, ScheduleScope};

async fn cached(service: &ScheduleService, view: ScheduleView) -> Option<Vec<ScheduleDetail>> {
    let schedules = service.ctx.schedule_views.get(view).await?;
    debug!("Schedule view {} served from cache", view.cache_key());
    Some(schedules)
}

/// 缓存未命中时查库并回填；没有对应资料的用户没有课程
async fn load_view(
    service: &ScheduleService,
    view: ScheduleView,
    scope: Option<ScheduleScope>,
) -> Result<Vec<ScheduleDetail>> {
    let ctx = &service.ctx;
    let schedules = match scope {
        Some(scope) => ctx.storage.list_schedule_details(scope).await?,
        None => Vec::new(),
    };

    ctx.schedule_views.put(view, &schedules).await;
    Ok(schedules)
}

pub async fn get_teacher_schedule(
    service: &ScheduleService,
    teacher_user_id: i64,
) -> Result<Vec<ScheduleDetail>> {
    let view = ScheduleView::Teacher(teacher_user_id);
    if let Some(schedules) = cached(service, view).await {
        return Ok(schedules);
    }

    let scope = service
        .ctx
        .storage
        .get_teacher_by_user_id(teacher_user_id)
        .await?
        .map(|teacher| ScheduleScope::Teacher(teacher.id));
    load_view(service, view, scope).await
}

pub async fn get_student_schedule(
    service: &ScheduleService,
    student_user_id: i64,
) -> Result<Vec<ScheduleDetail>> {
    let view = ScheduleView::Student(student_user_id);
    if let Some(schedules) = cached(service, view).await {
        return Ok(schedules);
    }

    let scope = service
        .ctx
        .storage
        .get_student_by_user_id(student_user_id)
        .await?
        .map(|student| ScheduleScope::Student(student.id));
    load_view(service, view, scope).await
}

pub async fn get_all_schedules(service: &ScheduleService) -> Result<Vec<ScheduleDetail>> {
    if let Some(schedules) = cached(service, ScheduleView::All).await {
        return Ok(schedules);
    }
    load_view(service, ScheduleView::All, Some(ScheduleScope::All)).await
}
