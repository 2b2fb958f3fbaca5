use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::students::{Column, Entity as Students, Model as StudentModel};
use crate::entity::subjects::{Column as SubjectColumn, Entity as Subjects};
use crate::entity::users::Entity as Users;
use crate::errors::{Result, TutorError};
use crate::models::students::entities::{Student, StudentWithSubjects};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

impl SeaOrmStorage {
    /// 通过 ID 获取学生资料
    pub async fn get_student_by_id_impl(&self, student_id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(student_id)
            .find_also_related(Users)
            .one(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|(student, user)| student.into_student(user.as_ref())))
    }

    /// 通过用户 ID 获取学生资料
    pub async fn get_student_by_user_id_impl(&self, user_id: i64) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::UserId.eq(user_id))
            .find_also_related(Users)
            .one(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|(student, user)| student.into_student(user.as_ref())))
    }

    /// 批量获取学生及其已选科目
    pub async fn get_students_with_subjects_impl(
        &self,
        student_ids: &[i64],
    ) -> Result<Vec<StudentWithSubjects>> {
        if student_ids.is_empty() {
            return Ok(Vec::new());
        }

        let students = Students::find()
            .filter(Column::Id.is_in(student_ids.to_vec()))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询学生失败: {e}")))?;

        self.attach_student_subjects(students).await
    }

    /// 未分配给该教师的学生（按 ID 升序）
    pub async fn list_unassigned_students_impl(
        &self,
        teacher_id: i64,
    ) -> Result<Vec<StudentWithSubjects>> {
        let assigned_ids = self.assigned_student_ids(teacher_id).await?;

        let mut select = Students::find();
        if !assigned_ids.is_empty() {
            select = select.filter(Column::Id.is_not_in(assigned_ids));
        }

        let students = select
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询学生失败: {e}")))?;

        self.attach_student_subjects(students).await
    }

    /// 已分配给该教师的学生（按 ID 升序）
    pub async fn list_assigned_students_impl(
        &self,
        teacher_id: i64,
    ) -> Result<Vec<StudentWithSubjects>> {
        let assigned_ids = self.assigned_student_ids(teacher_id).await?;
        self.get_students_with_subjects_impl(&assigned_ids).await
    }

    async fn assigned_student_ids(&self, teacher_id: i64) -> Result<Vec<i64>> {
        Assignments::find()
            .select_only()
            .column(AssignmentColumn::StudentId)
            .filter(AssignmentColumn::TeacherId.eq(teacher_id))
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询分配记录失败: {e}")))
    }

    /// 批量填充用户信息与已选科目名称
    async fn attach_student_subjects(
        &self,
        students: Vec<StudentModel>,
    ) -> Result<Vec<StudentWithSubjects>> {
        if students.is_empty() {
            return Ok(Vec::new());
        }

        let student_ids: Vec<i64> = students.iter().map(|s| s.id).collect();
        let user_map = self
            .load_user_map(students.iter().map(|s| s.user_id).collect())
            .await?;

        let enrollments = Enrollments::find()
            .filter(EnrollmentColumn::StudentId.is_in(student_ids))
            .order_by_asc(EnrollmentColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询选课记录失败: {e}")))?;

        let subject_ids: Vec<i64> = enrollments.iter().map(|e| e.subject_id).collect();
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

        let mut subjects_by_student: HashMap<i64, Vec<String>> = HashMap::new();
        for enrollment in enrollments {
            if let Some(name) = subject_names.get(&enrollment.subject_id) {
                subjects_by_student
                    .entry(enrollment.student_id)
                    .or_default()
                    .push(name.clone());
            }
        }

        Ok(students
            .into_iter()
            .map(|s| {
                let subjects = subjects_by_student.remove(&s.id).unwrap_or_default();
                let user = user_map.get(&s.user_id);
                StudentWithSubjects {
                    student: s.into_student(user),
                    subjects,
                }
            })
            .collect())
    }
}
