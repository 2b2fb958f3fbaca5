use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::students::entities::Student;

// 师生分配记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    pub id: i64,
    pub student_id: i64,
    pub teacher_id: i64,
    pub assigned_at: chrono::DateTime<chrono::Utc>,
}

// 按科目匹配度排序后的待分配学生
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct RankedStudent {
    #[serde(flatten)]
    #[ts(flatten)]
    pub student: Student,
    pub subjects: Vec<String>,
    /// 命中的科目，逗号分隔；没有命中时为 "None"
    pub matching_subjects: String,
    pub matches: bool,
}

// 存储层转移学生的结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReassignOutcome {
    /// 实际从原教师名下移出的学生数
    pub moved: u64,
    /// 改挂到目标教师名下的课程数
    pub rescheduled: u64,
}

// 转移时的冲突检查结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReassignCheck {
    Committed(ReassignOutcome),
    /// 严格模式下目标教师会被重复占用
    WouldDoubleBook,
}
