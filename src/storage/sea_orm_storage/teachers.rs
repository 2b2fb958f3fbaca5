use super::SeaOrmStorage;
use crate::entity::teachers::{ActiveModel, Column, Entity as Teachers, Model as TeacherModel};
use crate::entity::users::Entity as Users;
use crate::errors::{Result, TutorError};
use crate::models::teachers::{
    entities::{Teacher, TeacherStatus},
    requests::TeacherApplicationRequest,
};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 附带用户信息转换为业务模型
    async fn attach_teacher_user(&self, model: TeacherModel) -> Result<Teacher> {
        let user = Users::find_by_id(model.user_id)
            .one(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(model.into_teacher(user.as_ref()))
    }

    /// 创建待审核的教师资料
    pub async fn create_teacher_application_impl(
        &self,
        user_id: i64,
        req: TeacherApplicationRequest,
    ) -> Result<Teacher> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            user_id: Set(user_id),
            status: Set(TeacherStatus::Pending.to_string()),
            teachable_subjects: Set(req.teachable_subjects.trim().to_string()),
            bio: Set(req.bio),
            hire_date: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("创建教师申请失败: {e}")))?;

        self.attach_teacher_user(result).await
    }

    /// 通过 ID 获取教师资料
    pub async fn get_teacher_by_id_impl(&self, teacher_id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find_by_id(teacher_id)
            .one(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询教师失败: {e}")))?;

        match result {
            Some(model) => Ok(Some(self.attach_teacher_user(model).await?)),
            None => Ok(None),
        }
    }

    /// 通过用户 ID 获取教师资料
    pub async fn get_teacher_by_user_id_impl(&self, user_id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询教师失败: {e}")))?;

        match result {
            Some(model) => Ok(Some(self.attach_teacher_user(model).await?)),
            None => Ok(None),
        }
    }

    /// 列出教师资料（最新申请在前）
    pub async fn list_teachers_impl(&self, status: Option<TeacherStatus>) -> Result<Vec<Teacher>> {
        let mut select = Teachers::find();
        if let Some(status) = status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let teachers = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询教师列表失败: {e}")))?;

        let user_map = self
            .load_user_map(teachers.iter().map(|t| t.user_id).collect())
            .await?;

        Ok(teachers
            .into_iter()
            .map(|t| {
                let user = user_map.get(&t.user_id);
                t.into_teacher(user)
            })
            .collect())
    }

    /// 更新审核状态
    pub async fn update_teacher_status_impl(
        &self,
        teacher_id: i64,
        status: TeacherStatus,
        hire_date: Option<DateTime<Utc>>,
    ) -> Result<Option<Teacher>> {
        let existing = Teachers::find_by_id(teacher_id)
            .one(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询教师失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.status = Set(status.to_string());
        if let Some(hire_date) = hire_date {
            model.hire_date = Set(Some(hire_date.timestamp()));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("更新教师状态失败: {e}")))?;

        Ok(Some(self.attach_teacher_user(result).await?))
    }

    /// 更新可授科目
    pub async fn update_teachable_subjects_impl(
        &self,
        teacher_id: i64,
        teachable_subjects: &str,
    ) -> Result<Option<Teacher>> {
        let existing = Teachers::find_by_id(teacher_id)
            .one(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询教师失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.teachable_subjects = Set(teachable_subjects.trim().to_string());
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("更新可授科目失败: {e}")))?;

        Ok(Some(self.attach_teacher_user(result).await?))
    }
}
