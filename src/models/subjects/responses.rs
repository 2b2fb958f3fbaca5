use serde::Serialize;
use ts_rs::TS;

use super::entities::{Enrollment, Subject};

/// 科目列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectListResponse {
    pub items: Vec<Subject>,
}

/// 选课结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct EnrollmentResponse {
    pub enrollment: Enrollment,
    pub subject: Subject,
}
