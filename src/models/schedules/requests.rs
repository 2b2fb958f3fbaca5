use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

// 新建或更新课程安排
//
// # teacher_id 字段说明
// - **教师操作**：忽略该字段，使用当前登录教师的资料
// - **管理员操作**：必填，指定为哪位教师排课
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct UpsertScheduleRequest {
    pub teacher_id: Option<i64>,
    pub student_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub title: Option<String>,
}
