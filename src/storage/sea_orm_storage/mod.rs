//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod schedules;
mod students;
mod subjects;
mod teachers;
mod users;

use crate::config::AppConfig;
use crate::errors::{Result, TutorError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        let storage = Self::from_connection(db).await?;
        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(storage)
    }

    /// 使用已有连接创建存储实例并运行迁移（测试使用内存 SQLite）
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| TutorError::database_operation(format!("数据库迁移失败: {e}")))?;

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| TutorError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| TutorError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| TutorError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(TutorError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    // 教师模块
    async fn create_teacher_application(
        &self,
        user_id: i64,
        req: TeacherApplicationRequest,
    ) -> Result<Teacher> {
        self.create_teacher_application_impl(user_id, req).await
    }

    async fn get_teacher_by_id(&self, teacher_id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_by_id_impl(teacher_id).await
    }

    async fn get_teacher_by_user_id(&self, user_id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_by_user_id_impl(user_id).await
    }

    async fn list_teachers(&self, status: Option<TeacherStatus>) -> Result<Vec<Teacher>> {
        self.list_teachers_impl(status).await
    }

    async fn update_teacher_status(
        &self,
        teacher_id: i64,
        status: TeacherStatus,
        hire_date: Option<DateTime<Utc>>,
    ) -> Result<Option<Teacher>> {
        self.update_teacher_status_impl(teacher_id, status, hire_date)
            .await
    }

    async fn update_teachable_subjects(
        &self,
        teacher_id: i64,
        teachable_subjects: &str,
    ) -> Result<Option<Teacher>> {
        self.update_teachable_subjects_impl(teacher_id, teachable_subjects)
            .await
    }

    // 学生模块
    async fn get_student_by_id(&self, student_id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(student_id).await
    }

    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<Student>> {
        self.get_student_by_user_id_impl(user_id).await
    }

    async fn get_students_with_subjects(
        &self,
        student_ids: &[i64],
    ) -> Result<Vec<StudentWithSubjects>> {
        self.get_students_with_subjects_impl(student_ids).await
    }

    async fn list_unassigned_students(
        &self,
        teacher_id: i64,
    ) -> Result<Vec<StudentWithSubjects>> {
        self.list_unassigned_students_impl(teacher_id).await
    }

    async fn list_assigned_students(&self, teacher_id: i64) -> Result<Vec<StudentWithSubjects>> {
        self.list_assigned_students_impl(teacher_id).await
    }

    // 科目模块
    async fn create_subject(&self, req: CreateSubjectRequest) -> Result<Subject> {
        self.create_subject_impl(req).await
    }

    async fn get_subject_by_id(&self, subject_id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(subject_id).await
    }

    async fn get_subject_by_name(&self, name: &str) -> Result<Option<Subject>> {
        self.get_subject_by_name_impl(name).await
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>> {
        self.list_subjects_impl().await
    }

    async fn create_enrollment(&self, student_id: i64, subject_id: i64) -> Result<Enrollment> {
        self.create_enrollment_impl(student_id, subject_id).await
    }

    async fn get_enrollment(
        &self,
        student_id: i64,
        subject_id: i64,
    ) -> Result<Option<Enrollment>> {
        self.get_enrollment_impl(student_id, subject_id).await
    }

    async fn list_student_subjects(&self, student_id: i64) -> Result<Vec<Subject>> {
        self.list_student_subjects_impl(student_id).await
    }

    async fn get_subscription_by_student_id(
        &self,
        student_id: i64,
    ) -> Result<Option<Subscription>> {
        self.get_subscription_by_student_id_impl(student_id).await
    }

    async fn upsert_subscription(
        &self,
        student_id: i64,
        status: &str,
        current_period_end: Option<DateTime<Utc>>,
    ) -> Result<Subscription> {
        self.upsert_subscription_impl(student_id, status, current_period_end)
            .await
    }

    // 课程安排模块
    async fn has_schedule_conflict(
        &self,
        teacher_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_schedule_id: Option<i64>,
    ) -> Result<bool> {
        self.has_schedule_conflict_impl(teacher_id, start, end, exclude_schedule_id)
            .await
    }

    async fn get_schedule_by_id_and_teacher(
        &self,
        schedule_id: i64,
        teacher_id: i64,
    ) -> Result<Option<Schedule>> {
        self.get_schedule_by_id_and_teacher_impl(schedule_id, teacher_id)
            .await
    }

    async fn save_schedule(
        &self,
        write: ScheduleWrite,
        check_conflicts: bool,
    ) -> Result<ScheduleSaveOutcome> {
        self.save_schedule_impl(write, check_conflicts).await
    }

    async fn delete_schedule(&self, schedule_id: i64, teacher_id: i64) -> Result<bool> {
        self.delete_schedule_impl(schedule_id, teacher_id).await
    }

    async fn list_schedule_details(&self, scope: ScheduleScope) -> Result<Vec<ScheduleDetail>> {
        self.list_schedule_details_impl(scope).await
    }

    // 分配模块
    async fn create_assignments(&self, teacher_id: i64, student_ids: &[i64]) -> Result<u64> {
        self.create_assignments_impl(teacher_id, student_ids).await
    }

    async fn delete_assignment(&self, teacher_id: i64, student_id: i64) -> Result<bool> {
        self.delete_assignment_impl(teacher_id, student_id).await
    }

    async fn list_assigned_student_ids(
        &self,
        teacher_id: i64,
        student_ids: &[i64],
    ) -> Result<Vec<i64>> {
        self.list_assigned_student_ids_impl(teacher_id, student_ids)
            .await
    }

    async fn reassign_students(
        &self,
        from_teacher_id: i64,
        to_teacher_id: i64,
        student_ids: &[i64],
        check_conflicts: bool,
    ) -> Result<ReassignCheck> {
        self.reassign_students_impl(from_teacher_id, to_teacher_id, student_ids, check_conflicts)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("tutorlink.db").unwrap(),
            "sqlite://tutorlink.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/t").unwrap(),
            "postgres://u:p@localhost/t"
        );
        assert!(SeaOrmStorage::build_database_url("redis://localhost").is_err());
    }
}
