pub mod assign;
pub mod matching;
pub mod reassign;
pub mod roster;
pub mod unassign;
pub mod unassigned;

use crate::errors::Result;
use crate::models::assignments::responses::{
    AssignmentResult, ReassignmentResult, TeacherStudentsResponse, UnassignedStudentsResponse,
};
use crate::services::ServiceContext;

pub const MSG_TEACHER_REQUIRED: &str = "Teacher id is required";
pub const MSG_STUDENTS_REQUIRED: &str = "Student ids are required";

pub struct AssignmentService {
    ctx: ServiceContext,
}

impl AssignmentService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    // 将学生分配给教师（已存在的分配跳过）
    pub async fn assign_students(
        &self,
        teacher_id: Option<i64>,
        student_ids: &[i64],
    ) -> Result<AssignmentResult> {
        assign::assign_students(self, teacher_id, student_ids).await
    }

    // 解除分配，课程保留
    pub async fn unassign_student(&self, teacher_id: i64, student_id: i64) -> Result<()> {
        unassign::unassign_student(self, teacher_id, student_id).await
    }

    // 未分配给该教师的学生，匹配的排在前面
    pub async fn get_unassigned_students(
        &self,
        teacher_id: i64,
    ) -> Result<UnassignedStudentsResponse> {
        unassigned::get_unassigned_students(self, teacher_id).await
    }

    // 当前教师名下的学生
    pub async fn get_teacher_students(
        &self,
        teacher_user_id: i64,
    ) -> Result<TeacherStudentsResponse> {
        roster::get_teacher_students(self, teacher_user_id).await
    }

    // 在两位教师之间转移学生及其课程
    pub async fn reassign_students(
        &self,
        from_teacher_id: i64,
        to_teacher_id: i64,
        student_ids: &[i64],
    ) -> Result<ReassignmentResult> {
        reassign::reassign_students(self, from_teacher_id, to_teacher_id, student_ids).await
    }
}
