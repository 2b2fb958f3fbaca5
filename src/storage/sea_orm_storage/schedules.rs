use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::schedules::{ActiveModel, Column, Entity as Schedules, Model as ScheduleModel};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::entity::subjects::{Column as SubjectColumn, Entity as Subjects};
use crate::entity::teachers::{Column as TeacherColumn, Entity as Teachers};
use crate::errors::{Result, TutorError};
use crate::models::schedules::entities::{
    Schedule, ScheduleDetail, ScheduleSaveOutcome, ScheduleScope, ScheduleWrite,
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

/// 教师在 `[start, end)` 内是否已有课程
///
/// 条件为 `existing.start < end AND existing.end > start`，首尾相接不算重叠
pub(super) async fn overlapping_exists<C: ConnectionTrait>(
    conn: &C,
    teacher_id: i64,
    start: i64,
    end: i64,
    exclude_schedule_id: Option<i64>,
) -> std::result::Result<bool, DbErr> {
    let mut select = Schedules::find()
        .filter(Column::TeacherId.eq(teacher_id))
        .filter(Column::StartTime.lt(end))
        .filter(Column::EndTime.gt(start));

    if let Some(exclude_id) = exclude_schedule_id {
        select = select.filter(Column::Id.ne(exclude_id));
    }

    Ok(select.count(conn).await? > 0)
}

/// 新建或更新课程；更新时只改科目、时间与标题
async fn write_schedule<C: ConnectionTrait>(
    conn: &C,
    write: ScheduleWrite,
) -> std::result::Result<ScheduleSaveOutcome, DbErr> {
    let now = chrono::Utc::now().timestamp();

    let saved = match write.schedule_id {
        Some(schedule_id) => {
            let existing = Schedules::find_by_id(schedule_id)
                .filter(Column::TeacherId.eq(write.teacher_id))
                .one(conn)
                .await?;

            let Some(existing) = existing else {
                return Ok(ScheduleSaveOutcome::NotFound);
            };

            let mut model: ActiveModel = existing.into();
            model.subject_id = Set(write.subject_id);
            model.start_time = Set(write.start_time.timestamp());
            model.end_time = Set(write.end_time.timestamp());
            model.title = Set(write.title);
            model.updated_at = Set(now);
            model.update(conn).await?
        }
        None => {
            ActiveModel {
                teacher_id: Set(write.teacher_id),
                student_id: Set(write.student_id),
                subject_id: Set(write.subject_id),
                start_time: Set(write.start_time.timestamp()),
                end_time: Set(write.end_time.timestamp()),
                title: Set(write.title),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(conn)
            .await?
        }
    };

    Ok(ScheduleSaveOutcome::Saved(saved.into_schedule()))
}

impl SeaOrmStorage {
    pub async fn has_schedule_conflict_impl(
        &self,
        teacher_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_schedule_id: Option<i64>,
    ) -> Result<bool> {
        overlapping_exists(
            &self.db,
            teacher_id,
            start.timestamp(),
            end.timestamp(),
            exclude_schedule_id,
        )
        .await
        .map_err(|e| TutorError::database_operation(format!("冲突检查失败: {e}")))
    }

    /// 获取属于指定教师的课程
    pub async fn get_schedule_by_id_and_teacher_impl(
        &self,
        schedule_id: i64,
        teacher_id: i64,
    ) -> Result<Option<Schedule>> {
        let result = Schedules::find_by_id(schedule_id)
            .filter(Column::TeacherId.eq(teacher_id))
            .one(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_schedule()))
    }

    /// 保存课程
    ///
    /// `check_conflicts` 为真时在事务内重新检查冲突后再写入，发现冲突直接回滚
    pub async fn save_schedule_impl(
        &self,
        write: ScheduleWrite,
        check_conflicts: bool,
    ) -> Result<ScheduleSaveOutcome> {
        if !check_conflicts {
            return write_schedule(&self.db, write)
                .await
                .map_err(|e| TutorError::database_operation(format!("保存课程失败: {e}")));
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| TutorError::database_operation(format!("开启事务失败: {e}")))?;

        let conflict = overlapping_exists(
            &txn,
            write.teacher_id,
            write.start_time.timestamp(),
            write.end_time.timestamp(),
            write.schedule_id,
        )
        .await
        .map_err(|e| TutorError::database_operation(format!("冲突检查失败: {e}")))?;

        if conflict {
            return Ok(ScheduleSaveOutcome::Conflict);
        }

        let outcome = write_schedule(&txn, write)
            .await
            .map_err(|e| TutorError::database_operation(format!("保存课程失败: {e}")))?;

        if let ScheduleSaveOutcome::Saved(_) = outcome {
            txn.commit()
                .await
                .map_err(|e| TutorError::database_operation(format!("提交事务失败: {e}")))?;
        }

        Ok(outcome)
    }

    /// 删除属于指定教师的课程
    pub async fn delete_schedule_impl(&self, schedule_id: i64, teacher_id: i64) -> Result<bool> {
        let result = Schedules::delete_many()
            .filter(Column::Id.eq(schedule_id))
            .filter(Column::TeacherId.eq(teacher_id))
            .exec(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("删除课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 列出课程并填充教师、学生、科目名称
    pub async fn list_schedule_details_impl(
        &self,
        scope: ScheduleScope,
    ) -> Result<Vec<ScheduleDetail>> {
        let mut select = Schedules::find();
        select = match scope {
            ScheduleScope::Teacher(teacher_id) => select.filter(Column::TeacherId.eq(teacher_id)),
            ScheduleScope::Student(student_id) => select.filter(Column::StudentId.eq(student_id)),
            ScheduleScope::All => select,
        };

        let schedules = select
            .order_by_asc(Column::StartTime)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询课程列表失败: {e}")))?;

        self.attach_schedule_names(schedules).await
    }

    async fn attach_schedule_names(
        &self,
        schedules: Vec<ScheduleModel>,
    ) -> Result<Vec<ScheduleDetail>> {
        if schedules.is_empty() {
            return Ok(Vec::new());
        }

        let teacher_ids: Vec<i64> = schedules.iter().map(|s| s.teacher_id).collect();
        let student_ids: Vec<i64> = schedules.iter().filter_map(|s| s.student_id).collect();
        let subject_ids: Vec<i64> = schedules.iter().filter_map(|s| s.subject_id).collect();

        // 教师/学生资料 ID -> 用户 ID
        let teacher_users: HashMap<i64, i64> = Teachers::find()
            .filter(TeacherColumn::Id.is_in(teacher_ids))
            .all(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询教师失败: {e}")))?
            .into_iter()
            .map(|t| (t.id, t.user_id))
            .collect();

        let student_users: HashMap<i64, i64> = if student_ids.is_empty() {
            HashMap::new()
        } else {
            Students::find()
                .filter(StudentColumn::Id.is_in(student_ids))
                .all(&self.db)
                .await
                .map_err(|e| TutorError::database_operation(format!("查询学生失败: {e}")))?
                .into_iter()
                .map(|s| (s.id, s.user_id))
                .collect()
        };

        let subject_names: HashMap<i64, String> = if subject_ids.is_empty() {
            HashMap::new()
        } else {
            Subjects::find()
                .filter(SubjectColumn::Id.is_in(subject_ids))
                .all(&self.db)
                .await
                .map_err(|e| TutorError::database_operation(format!("查询科目失败: {e}")))?
                .into_iter()
                .map(|s| (s.id, s.name))
                .collect()
        };

        let user_ids: Vec<i64> = teacher_users
            .values()
            .chain(student_users.values())
            .copied()
            .collect();
        let user_map = self.load_user_map(user_ids).await?;

        let name_of = |user_id: Option<&i64>| {
            user_id
                .and_then(|id| user_map.get(id))
                .map(|u| u.name.clone())
        };

        Ok(schedules
            .into_iter()
            .map(|s| {
                let teacher_name = name_of(teacher_users.get(&s.teacher_id)).unwrap_or_default();
                let student_name = s
                    .student_id
                    .and_then(|id| name_of(student_users.get(&id)));
                let subject_name = s.subject_id.and_then(|id| subject_names.get(&id).cloned());

                ScheduleDetail {
                    schedule: s.into_schedule(),
                    teacher_name,
                    student_name,
                    subject_name,
                }
            })
            .collect())
    }
}
