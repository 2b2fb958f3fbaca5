use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::models::{
    assignments::entities::ReassignCheck,
    schedules::entities::{
        Schedule, ScheduleDetail, ScheduleSaveOutcome, ScheduleScope, ScheduleWrite,
    },
    students::entities::{Student, StudentWithSubjects},
    subjects::{
        entities::{Enrollment, Subject, Subscription},
        requests::CreateSubjectRequest,
    },
    teachers::{
        entities::{Teacher, TeacherStatus},
        requests::TeacherApplicationRequest,
    },
    users::{entities::User, requests::CreateUserRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户；学生角色同时创建学生资料
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// 教师管理方法
    // 提交教师申请（创建待审核的教师资料）
    async fn create_teacher_application(
        &self,
        user_id: i64,
        req: TeacherApplicationRequest,
    ) -> Result<Teacher>;
    // 通过ID获取教师资料
    async fn get_teacher_by_id(&self, teacher_id: i64) -> Result<Option<Teacher>>;
    // 通过用户ID获取教师资料
    async fn get_teacher_by_user_id(&self, user_id: i64) -> Result<Option<Teacher>>;
    // 列出教师资料，可按状态筛选
    async fn list_teachers(&self, status: Option<TeacherStatus>) -> Result<Vec<Teacher>>;
    // 更新审核状态
    async fn update_teacher_status(
        &self,
        teacher_id: i64,
        status: TeacherStatus,
        hire_date: Option<DateTime<Utc>>,
    ) -> Result<Option<Teacher>>;
    // 更新可授科目
    async fn update_teachable_subjects(
        &self,
        teacher_id: i64,
        teachable_subjects: &str,
    ) -> Result<Option<Teacher>>;

    /// 学生管理方法
    // 通过ID获取学生资料
    async fn get_student_by_id(&self, student_id: i64) -> Result<Option<Student>>;
    // 通过用户ID获取学生资料
    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<Student>>;
    // 批量获取学生及其已选科目，不存在的ID被忽略
    async fn get_students_with_subjects(
        &self,
        student_ids: &[i64],
    ) -> Result<Vec<StudentWithSubjects>>;
    // 未分配给该教师的学生
    async fn list_unassigned_students(&self, teacher_id: i64)
    -> Result<Vec<StudentWithSubjects>>;
    // 已分配给该教师的学生
    async fn list_assigned_students(&self, teacher_id: i64) -> Result<Vec<StudentWithSubjects>>;

    /// 科目与选课方法
    // 创建科目
    async fn create_subject(&self, req: CreateSubjectRequest) -> Result<Subject>;
    // 通过ID获取科目
    async fn get_subject_by_id(&self, subject_id: i64) -> Result<Option<Subject>>;
    // 通过名称获取科目（忽略大小写）
    async fn get_subject_by_name(&self, name: &str) -> Result<Option<Subject>>;
    // 列出科目
    async fn list_subjects(&self) -> Result<Vec<Subject>>;
    // 选课
    async fn create_enrollment(&self, student_id: i64, subject_id: i64) -> Result<Enrollment>;
    // 查询选课记录
    async fn get_enrollment(&self, student_id: i64, subject_id: i64)
    -> Result<Option<Enrollment>>;
    // 学生已选科目
    async fn list_student_subjects(&self, student_id: i64) -> Result<Vec<Subject>>;
    // 获取订阅状态
    async fn get_subscription_by_student_id(&self, student_id: i64)
    -> Result<Option<Subscription>>;
    // 写入订阅状态（支付服务同步）
    async fn upsert_subscription(
        &self,
        student_id: i64,
        status: &str,
        current_period_end: Option<DateTime<Utc>>,
    ) -> Result<Subscription>;

    /// 课程安排方法
    // 教师在 [start, end) 内是否已有课程，可排除指定课程
    async fn has_schedule_conflict(
        &self,
        teacher_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_schedule_id: Option<i64>,
    ) -> Result<bool>;
    // 获取属于指定教师的课程
    async fn get_schedule_by_id_and_teacher(
        &self,
        schedule_id: i64,
        teacher_id: i64,
    ) -> Result<Option<Schedule>>;
    // 新建或更新课程；check_conflicts 为真时冲突检查与写入在同一事务内完成
    async fn save_schedule(
        &self,
        write: ScheduleWrite,
        check_conflicts: bool,
    ) -> Result<ScheduleSaveOutcome>;
    // 删除属于指定教师的课程
    async fn delete_schedule(&self, schedule_id: i64, teacher_id: i64) -> Result<bool>;
    // 列出课程（附带名称），按开始时间升序
    async fn list_schedule_details(&self, scope: ScheduleScope) -> Result<Vec<ScheduleDetail>>;

    /// 师生分配方法
    // 批量创建分配，已存在的师生对跳过；返回实际插入数
    async fn create_assignments(&self, teacher_id: i64, student_ids: &[i64]) -> Result<u64>;
    // 删除分配
    async fn delete_assignment(&self, teacher_id: i64, student_id: i64) -> Result<bool>;
    // student_ids 中当前分配给该教师的学生
    async fn list_assigned_student_ids(
        &self,
        teacher_id: i64,
        student_ids: &[i64],
    ) -> Result<Vec<i64>>;
    // 在同一事务内转移学生及其课程
    async fn reassign_students(
        &self,
        from_teacher_id: i64,
        to_teacher_id: i64,
        student_ids: &[i64],
        check_conflicts: bool,
    ) -> Result<ReassignCheck>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
