use serde::Deserialize;
use ts_rs::TS;

use super::entities::TeacherStatus;

// 提交教师申请
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct TeacherApplicationRequest {
    pub teachable_subjects: String,
    pub bio: Option<String>,
}

// 审核决定
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub enum ReviewDecision {
    Approve,
    Reject,
}

// 审核教师申请
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct ReviewApplicationRequest {
    pub decision: ReviewDecision,
}

// 申请列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct ApplicationListParams {
    pub status: Option<TeacherStatus>,
}

// 更新可授科目
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct UpdateTeachableSubjectsRequest {
    pub teachable_subjects: String,
}
