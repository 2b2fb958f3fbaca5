use chrono::{DateTime, Utc};

use super::ScheduleService;
use crate::errors::Result;

/// 冲突检测：`existing.start < end AND existing.end > start`
///
/// 只检查教师维度，不校验 start < end，也不检查学生或科目
pub async fn has_conflict(
    service: &ScheduleService,
    teacher_id: i64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    exclude_schedule_id: Option<i64>,
) -> Result<bool> {
    service
        .ctx
        .storage
        .has_schedule_conflict(teacher_id, start, end, exclude_schedule_id)
        .await
}
