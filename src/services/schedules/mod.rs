pub mod conflict;
pub mod delete;
pub mod list;
pub mod upsert;

use chrono::{DateTime, Utc};

use crate::errors::{Result, TutorError};
use crate::models::schedules::entities::{ScheduleDetail, ScheduleWrite};
use crate::models::users::entities::{User, UserRole};
use crate::services::ServiceContext;

pub const MSG_INVALID_RANGE: &str = "End time must be after start time";
pub const MSG_SUBSECOND_TIME: &str = "Start and end times must be whole seconds";
pub const MSG_CREATE_CONFLICT: &str = "This time slot is already taken";
pub const MSG_UPDATE_CONFLICT: &str = "This update conflicts with another scheduled session";
pub const MSG_SCHEDULE_NOT_FOUND: &str = "Schedule not found or unauthorized";

pub struct ScheduleService {
    ctx: ServiceContext,
}

impl ScheduleService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    // 教师在该时间段是否已有课程
    pub async fn has_conflict(
        &self,
        teacher_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_schedule_id: Option<i64>,
    ) -> Result<bool> {
        conflict::has_conflict(self, teacher_id, start, end, exclude_schedule_id).await
    }

    // 新建或更新课程
    pub async fn upsert_schedule(&self, write: ScheduleWrite) -> Result<ScheduleDetail> {
        upsert::upsert_schedule(self, write).await
    }

    // 删除课程（仅限课程所属教师）
    pub async fn delete_schedule(&self, schedule_id: i64, teacher_user_id: i64) -> Result<()> {
        delete::delete_schedule(self, schedule_id, teacher_user_id).await
    }

    pub async fn get_teacher_schedule(&self, teacher_user_id: i64) -> Result<Vec<ScheduleDetail>> {
        list::get_teacher_schedule(self, teacher_user_id).await
    }

    pub async fn get_student_schedule(&self, student_user_id: i64) -> Result<Vec<ScheduleDetail>> {
        list::get_student_schedule(self, student_user_id).await
    }

    pub async fn get_all_schedules(&self) -> Result<Vec<ScheduleDetail>> {
        list::get_all_schedules(self).await
    }

    /// 确定排课教师：教师只能给自己排课，管理员必须指定教师
    pub async fn resolve_teacher_id(&self, caller: &User, requested: Option<i64>) -> Result<i64> {
        match caller.role {
            UserRole::Admin => requested.ok_or_else(|| TutorError::validation("Teacher id is required")),
            UserRole::Teacher => self
                .ctx
                .storage
                .get_teacher_by_user_id(caller.id)
                .await?
                .map(|teacher| teacher.id)
                .ok_or_else(|| TutorError::not_found("Teacher not found")),
            UserRole::Student => Err(TutorError::authorization(
                "Students cannot manage schedules",
            )),
        }
    }
}
