use serde::Serialize;
use ts_rs::TS;

use super::entities::ScheduleDetail;

/// 单个课程安排响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct ScheduleResponse {
    pub schedule: ScheduleDetail,
}

/// 课程安排列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct ScheduleListResponse {
    pub schedules: Vec<ScheduleDetail>,
}
