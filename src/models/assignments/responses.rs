use serde::Serialize;
use ts_rs::TS;

use super::entities::RankedStudent;

/// 批量分配结果
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentResult {
    pub success: bool,
    pub count: u64,
}

/// 转移结果
///
/// `count` 为请求中的学生数，`moved` 为实际从原教师名下移出的学生数，
/// `rescheduled` 为随之转移的课程数
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct ReassignmentResult {
    pub success: bool,
    pub count: u64,
    pub moved: u64,
    pub rescheduled: u64,
}

/// 待分配学生列表
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct UnassignedStudentsResponse {
    pub teacher_id: i64,
    pub students: Vec<RankedStudent>,
}

/// 教师名下学生列表（附带与该教师的科目匹配情况）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct TeacherStudentsResponse {
    pub teacher_id: i64,
    pub students: Vec<RankedStudent>,
}
