use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::students::ActiveModel as StudentActiveModel;
use crate::entity::users::{ActiveModel, Column, Entity as Users, Model as UserModel};
use crate::errors::{Result, TutorError};
use crate::models::users::{
    entities::{User, UserRole},
    requests::CreateUserRequest,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait};

impl SeaOrmStorage {
    /// 创建用户，学生角色在同一事务内创建学生资料
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| TutorError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            name: Set(req.name.trim().to_string()),
            email: Set(req.email.trim().to_lowercase()),
            role: Set(req.role.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let user = model
            .insert(&txn)
            .await
            .map_err(|e| TutorError::database_operation(format!("创建用户失败: {e}")))?;

        if req.role == UserRole::Student {
            StudentActiveModel {
                user_id: Set(user.id),
                created_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| TutorError::database_operation(format!("创建学生资料失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| TutorError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(user.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email.trim().to_lowercase()))
            .one(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 批量加载用户，用于填充教师/学生的姓名与邮箱
    pub(super) async fn load_user_map(&self, user_ids: Vec<i64>) -> Result<HashMap<i64, UserModel>> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let users = Users::find()
            .filter(Column::Id.is_in(user_ids))
            .all(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(users.into_iter().map(|u| (u.id, u)).collect())
    }
}
