pub mod apply;
pub mod list;
pub mod review;
pub mod update;

use crate::errors::Result;
use crate::models::teachers::{
    entities::{Teacher, TeacherStatus},
    requests::{ReviewDecision, TeacherApplicationRequest},
    responses::TeacherListResponse,
};
use crate::services::ServiceContext;

pub struct TeacherService {
    ctx: ServiceContext,
}

impl TeacherService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    // 提交教师申请
    pub async fn apply(&self, user_id: i64, req: TeacherApplicationRequest) -> Result<Teacher> {
        apply::apply(self, user_id, req).await
    }

    // 列出教师申请
    pub async fn list_applications(
        &self,
        status: Option<TeacherStatus>,
    ) -> Result<TeacherListResponse> {
        list::list_applications(self, status).await
    }

    // 审核申请
    pub async fn review(&self, teacher_id: i64, decision: ReviewDecision) -> Result<Teacher> {
        review::review(self, teacher_id, decision).await
    }

    // 教师修改自己的可授科目
    pub async fn update_teachable_subjects(
        &self,
        teacher_user_id: i64,
        teachable_subjects: &str,
    ) -> Result<Teacher> {
        update::update_teachable_subjects(self, teacher_user_id, teachable_subjects).await
    }
}

pub(crate) fn normalize_subjects(raw: &str) -> Option<String> {
    let tokens: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    (!tokens.is_empty()).then(|| tokens.join(", "))
}
