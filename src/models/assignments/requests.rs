use serde::Deserialize;
use ts_rs::TS;

// 将学生分配给教师（仅管理员），teacher_id 缺失时返回校验错误
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignStudentsRequest {
    pub teacher_id: Option<i64>,
    pub student_ids: Vec<i64>,
}

// 在两位教师之间转移学生（仅管理员）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct ReassignStudentsRequest {
    pub from_teacher_id: i64,
    pub to_teacher_id: i64,
    pub student_ids: Vec<i64>,
}
