use super::SeaOrmStorage;
use crate::entity::enrollments::{
    ActiveModel as EnrollmentActiveModel, Column as EnrollmentColumn, Entity as Enrollments,
};
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::entity::subscriptions::{
    ActiveModel as SubscriptionActiveModel, Column as SubscriptionColumn, Entity as Subscriptions,
};
use crate::errors::{Result, TutorError};
use crate::models::subjects::{
    entities::{Enrollment, Subject, Subscription},
    requests::CreateSubjectRequest,
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    sea_query::{Expr, ExprTrait, Func},
};

impl SeaOrmStorage {
    /// 创建科目
    pub async fn create_subject_impl(&self, req: CreateSubjectRequest) -> Result<Subject> {
        let model = ActiveModel {
            name: Set(req.name.trim().to_string()),
            description: Set(req.description),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("创建科目失败: {e}")))?;

        Ok(result.into_subject())
    }

    /// 通过 ID 获取科目
    pub async fn get_subject_by_id_impl(&self, subject_id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(subject_id)
            .one(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    /// 通过名称获取科目（忽略大小写）
    pub async fn get_subject_by_name_impl(&self, name: &str) -> Result<Option<Subject>> {
        let result = Subjects::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(Column::Name)))
                    .eq(name.trim().to_lowercase()),
            )
            .one(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    /// 列出科目（按名称排序）
    pub async fn list_subjects_impl(&self) -> Result<Vec<Subject>> {
        let subjects = Subjects::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询科目列表失败: {e}")))?;

        Ok(subjects.into_iter().map(|m| m.into_subject()).collect())
    }

    /// 选课
    pub async fn create_enrollment_impl(
        &self,
        student_id: i64,
        subject_id: i64,
    ) -> Result<Enrollment> {
        let model = EnrollmentActiveModel {
            student_id: Set(student_id),
            subject_id: Set(subject_id),
            enrolled_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("选课失败: {e}")))?;

        Ok(result.into_enrollment())
    }

    /// 查询选课记录
    pub async fn get_enrollment_impl(
        &self,
        student_id: i64,
        subject_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = Enrollments::find()
            .filter(EnrollmentColumn::StudentId.eq(student_id))
            .filter(EnrollmentColumn::SubjectId.eq(subject_id))
            .one(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    /// 学生已选科目（按选课顺序）
    pub async fn list_student_subjects_impl(&self, student_id: i64) -> Result<Vec<Subject>> {
        let rows = Enrollments::find()
            .filter(EnrollmentColumn::StudentId.eq(student_id))
            .order_by_asc(EnrollmentColumn::Id)
            .find_also_related(Subjects)
            .all(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询已选科目失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|(_, subject)| subject.map(|s| s.into_subject()))
            .collect())
    }

    /// 获取订阅状态
    pub async fn get_subscription_by_student_id_impl(
        &self,
        student_id: i64,
    ) -> Result<Option<Subscription>> {
        let result = Subscriptions::find()
            .filter(SubscriptionColumn::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询订阅失败: {e}")))?;

        Ok(result.map(|m| m.into_subscription()))
    }

    /// 写入订阅状态，已有记录则覆盖
    pub async fn upsert_subscription_impl(
        &self,
        student_id: i64,
        status: &str,
        current_period_end: Option<DateTime<Utc>>,
    ) -> Result<Subscription> {
        let now = chrono::Utc::now().timestamp();
        let existing = Subscriptions::find()
            .filter(SubscriptionColumn::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询订阅失败: {e}")))?;

        let result = match existing {
            Some(existing) => {
                let mut model: SubscriptionActiveModel = existing.into();
                model.status = Set(status.to_string());
                model.current_period_end = Set(current_period_end.map(|t| t.timestamp()));
                model.updated_at = Set(now);
                model.update(&self.db).await
            }
            None => {
                SubscriptionActiveModel {
                    student_id: Set(student_id),
                    status: Set(status.to_string()),
                    current_period_end: Set(current_period_end.map(|t| t.timestamp())),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&self.db)
                .await
            }
        }
        .map_err(|e| TutorError::database_operation(format!("更新订阅失败: {e}")))?;

        Ok(result.into_subscription())
    }
}
