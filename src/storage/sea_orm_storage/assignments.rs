use std::collections::HashSet;

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::entity::schedules::{Column as ScheduleColumn, Entity as Schedules};
use crate::errors::{Result, TutorError};
use crate::models::assignments::entities::{ReassignCheck, ReassignOutcome};
use crate::models::schedules::entities::intervals_overlap;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect,
    Set, TransactionTrait, sea_query::Expr,
};

/// `student_ids` 中已分配给该教师的学生
async fn assigned_among<C: ConnectionTrait>(
    conn: &C,
    teacher_id: i64,
    student_ids: &[i64],
) -> std::result::Result<Vec<i64>, DbErr> {
    if student_ids.is_empty() {
        return Ok(Vec::new());
    }

    Assignments::find()
        .select_only()
        .column(Column::StudentId)
        .filter(Column::TeacherId.eq(teacher_id))
        .filter(Column::StudentId.is_in(student_ids.to_vec()))
        .into_tuple::<i64>()
        .all(conn)
        .await
}

/// 插入分配记录，跳过已存在的师生对与重复 ID
async fn insert_assignments<C: ConnectionTrait>(
    conn: &C,
    teacher_id: i64,
    student_ids: &[i64],
) -> std::result::Result<u64, DbErr> {
    let mut seen: HashSet<i64> = assigned_among(conn, teacher_id, student_ids)
        .await?
        .into_iter()
        .collect();

    let now = chrono::Utc::now().timestamp();
    let mut inserted = 0u64;
    for &student_id in student_ids {
        if !seen.insert(student_id) {
            continue;
        }

        ActiveModel {
            student_id: Set(student_id),
            teacher_id: Set(teacher_id),
            assigned_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await?;
        inserted += 1;
    }

    Ok(inserted)
}

impl SeaOrmStorage {
    /// 批量创建分配，返回实际插入数
    pub async fn create_assignments_impl(&self, teacher_id: i64, student_ids: &[i64]) -> Result<u64> {
        if student_ids.is_empty() {
            return Ok(0);
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| TutorError::database_operation(format!("开启事务失败: {e}")))?;

        let inserted = insert_assignments(&txn, teacher_id, student_ids)
            .await
            .map_err(|e| TutorError::database_operation(format!("创建分配失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| TutorError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(inserted)
    }

    /// 删除分配（课程保持不变）
    pub async fn delete_assignment_impl(&self, teacher_id: i64, student_id: i64) -> Result<bool> {
        let result = Assignments::delete_many()
            .filter(Column::TeacherId.eq(teacher_id))
            .filter(Column::StudentId.eq(student_id))
            .exec(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("删除分配失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn list_assigned_student_ids_impl(
        &self,
        teacher_id: i64,
        student_ids: &[i64],
    ) -> Result<Vec<i64>> {
        assigned_among(&self.db, teacher_id, student_ids)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询分配记录失败: {e}")))
    }

    /// 转移学生
    ///
    /// 同一事务内：删除原分配、为目标教师创建分配（跳过已有）、把这些学生在原教师名下的课程改挂到目标教师。
    /// `check_conflicts` 为真时，改挂前检查这些课程与目标教师现有课程以及彼此之间是否重叠。
    pub async fn reassign_students_impl(
        &self,
        from_teacher_id: i64,
        to_teacher_id: i64,
        student_ids: &[i64],
        check_conflicts: bool,
    ) -> Result<ReassignCheck> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| TutorError::database_operation(format!("开启事务失败: {e}")))?;

        let moving = assigned_among(&txn, from_teacher_id, student_ids)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询分配记录失败: {e}")))?;

        if moving.is_empty() {
            return Ok(ReassignCheck::Committed(ReassignOutcome::default()));
        }

        if check_conflicts {
            let moved_sessions = Schedules::find()
                .filter(ScheduleColumn::TeacherId.eq(from_teacher_id))
                .filter(ScheduleColumn::StudentId.is_in(moving.clone()))
                .all(&txn)
                .await
                .map_err(|e| TutorError::database_operation(format!("查询课程失败: {e}")))?;

            let target_sessions = Schedules::find()
                .filter(ScheduleColumn::TeacherId.eq(to_teacher_id))
                .all(&txn)
                .await
                .map_err(|e| TutorError::database_operation(format!("查询课程失败: {e}")))?;

            for (i, moved) in moved_sessions.iter().enumerate() {
                let collides = target_sessions
                    .iter()
                    .chain(moved_sessions.iter().skip(i + 1))
                    .any(|other| {
                        intervals_overlap(
                            moved.start_time,
                            moved.end_time,
                            other.start_time,
                            other.end_time,
                        )
                    });
                if collides {
                    // 未提交的事务在 drop 时回滚
                    return Ok(ReassignCheck::WouldDoubleBook);
                }
            }
        }

        let removed = Assignments::delete_many()
            .filter(Column::TeacherId.eq(from_teacher_id))
            .filter(Column::StudentId.is_in(moving.clone()))
            .exec(&txn)
            .await
            .map_err(|e| TutorError::database_operation(format!("删除原分配失败: {e}")))?;

        insert_assignments(&txn, to_teacher_id, &moving)
            .await
            .map_err(|e| TutorError::database_operation(format!("创建新分配失败: {e}")))?;

        let rescheduled = Schedules::update_many()
            .col_expr(ScheduleColumn::TeacherId, Expr::value(to_teacher_id))
            .col_expr(
                ScheduleColumn::UpdatedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(ScheduleColumn::TeacherId.eq(from_teacher_id))
            .filter(ScheduleColumn::StudentId.is_in(moving))
            .exec(&txn)
            .await
            .map_err(|e| TutorError::database_operation(format!("更新课程教师失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| TutorError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(ReassignCheck::Committed(ReassignOutcome {
            moved: removed.rows_affected,
            rescheduled: rescheduled.rows_affected,
        }))
    }
}
