pub mod create;
pub mod enroll;
pub mod list;

use crate::errors::Result;
use crate::models::subjects::{
    entities::Subject,
    requests::CreateSubjectRequest,
    responses::{EnrollmentResponse, SubjectListResponse},
};
use crate::services::ServiceContext;

pub struct SubjectService {
    ctx: ServiceContext,
}

impl SubjectService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    pub async fn create_subject(&self, req: CreateSubjectRequest) -> Result<Subject> {
        create::create_subject(self, req).await
    }

    pub async fn list_subjects(&self) -> Result<SubjectListResponse> {
        list::list_subjects(self).await
    }

    // 学生选课，需要有效订阅
    pub async fn enroll(&self, student_user_id: i64, subject_id: i64) -> Result<EnrollmentResponse> {
        enroll::enroll(self, student_user_id, subject_id).await
    }

    pub async fn list_enrollments(&self, student_user_id: i64) -> Result<SubjectListResponse> {
        list::list_enrollments(self, student_user_id).await
    }
}
