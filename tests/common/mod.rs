//! 集成测试共用的装配：内存 SQLite + 记录型通知

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use sea_orm::SqlxSqliteConnector;
use sea_orm::sqlx::sqlite::SqlitePoolOptions;

use tutorlink::cache::{ObjectCache, ScheduleViewCache, object_cache::MokaCacheWrapper};
use tutorlink::errors::{Result, TutorError};
use tutorlink::models::schedules::entities::ScheduleWrite;
use tutorlink::models::students::entities::Student;
use tutorlink::models::subjects::{entities::Subject, requests::CreateSubjectRequest};
use tutorlink::models::teachers::{
    entities::Teacher,
    requests::{ReviewDecision, TeacherApplicationRequest},
};
use tutorlink::models::users::{
    entities::{User, UserRole},
    requests::{CreateUserRequest, UpdateSubscriptionRequest},
};
use tutorlink::services::notifications::{
    ClassScheduledEmail, Notifier, StudentAssignmentEmail, TeacherAssignmentEmail,
};
use tutorlink::services::{
    AssignmentService, NotificationDispatcher, ScheduleService, SchedulingGuard, ServiceContext,
    SubjectService, TeacherService, UserService,
};
use tutorlink::storage::{Storage, sea_orm_storage::SeaOrmStorage};

#[derive(Default)]
pub struct RecordingNotifier {
    pub scheduled: Mutex<Vec<ClassScheduledEmail>>,
    pub teachers: Mutex<Vec<TeacherAssignmentEmail>>,
    pub students: Mutex<Vec<StudentAssignmentEmail>>,
}

impl RecordingNotifier {
    pub fn scheduled(&self) -> Vec<ClassScheduledEmail> {
        self.scheduled.lock().unwrap().clone()
    }

    pub fn teachers(&self) -> Vec<TeacherAssignmentEmail> {
        self.teachers.lock().unwrap().clone()
    }

    pub fn students(&self) -> Vec<StudentAssignmentEmail> {
        self.students.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_class_schedule_email(&self, email: &ClassScheduledEmail) -> Result<()> {
        self.scheduled.lock().unwrap().push(email.clone());
        Ok(())
    }

    async fn send_teacher_assignment_email(&self, email: &TeacherAssignmentEmail) -> Result<()> {
        self.teachers.lock().unwrap().push(email.clone());
        Ok(())
    }

    async fn send_student_assignment_email(&self, email: &StudentAssignmentEmail) -> Result<()> {
        self.students.lock().unwrap().push(email.clone());
        Ok(())
    }
}

/// 每次发送都失败
pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn send_class_schedule_email(&self, _email: &ClassScheduledEmail) -> Result<()> {
        Err(TutorError::notification("mail relay unavailable"))
    }

    async fn send_teacher_assignment_email(&self, _email: &TeacherAssignmentEmail) -> Result<()> {
        Err(TutorError::notification("mail relay unavailable"))
    }

    async fn send_student_assignment_email(&self, _email: &StudentAssignmentEmail) -> Result<()> {
        Err(TutorError::notification("mail relay unavailable"))
    }
}

pub async fn memory_storage() -> Arc<dyn Storage> {
    // 内存库只存在于单个连接上
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory sqlite");
    let db = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool);
    Arc::new(
        SeaOrmStorage::from_connection(db)
            .await
            .expect("run migrations"),
    )
}

pub struct Harness {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
    pub notifier: Arc<RecordingNotifier>,
    pub schedules: ScheduleService,
    pub assignments: AssignmentService,
    pub teachers: TeacherService,
    pub subjects: SubjectService,
    pub users: UserService,
}

impl Harness {
    pub async fn new() -> Self {
        Self::build(false, None).await
    }

    pub async fn strict() -> Self {
        Self::build(true, None).await
    }

    pub async fn with_notifier(notifier: Arc<dyn Notifier>) -> Self {
        Self::build(false, Some(notifier)).await
    }

    async fn build(strict: bool, notifier: Option<Arc<dyn Notifier>>) -> Self {
        let storage = memory_storage().await;
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::new(1_000, 300));
        let recorder = Arc::new(RecordingNotifier::default());
        let notifier = notifier.unwrap_or_else(|| recorder.clone());

        let ctx = ServiceContext::new(
            storage.clone(),
            NotificationDispatcher::new(notifier, true),
            ScheduleViewCache::new(cache.clone(), 300),
            SchedulingGuard::new(strict),
        );

        Self {
            storage,
            cache,
            notifier: recorder,
            schedules: ScheduleService::new(ctx.clone()),
            assignments: AssignmentService::new(ctx.clone()),
            teachers: TeacherService::new(ctx.clone()),
            subjects: SubjectService::new(ctx.clone()),
            users: UserService::new(ctx),
        }
    }

    pub async fn user(&self, name: &str, role: UserRole) -> User {
        let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
        self.users
            .create_user(CreateUserRequest {
                name: name.to_string(),
                email,
                role,
            })
            .await
            .expect("create user")
    }

    pub async fn admin(&self) -> User {
        self.user("Root Admin", UserRole::Admin).await
    }

    /// 已审核通过的教师
    pub async fn teacher(&self, name: &str, teachable_subjects: &str) -> (User, Teacher) {
        let user = self.user(name, UserRole::Teacher).await;
        let application = self
            .teachers
            .apply(
                user.id,
                TeacherApplicationRequest {
                    teachable_subjects: teachable_subjects.to_string(),
                    bio: None,
                },
            )
            .await
            .expect("apply");
        let teacher = self
            .teachers
            .review(application.id, ReviewDecision::Approve)
            .await
            .expect("approve");
        (user, teacher)
    }

    pub async fn student(&self, name: &str) -> (User, Student) {
        let user = self.user(name, UserRole::Student).await;
        let student = self
            .storage
            .get_student_by_user_id(user.id)
            .await
            .expect("load student")
            .expect("student profile created with user");
        (user, student)
    }

    pub async fn subject(&self, name: &str) -> Subject {
        self.subjects
            .create_subject(CreateSubjectRequest {
                name: name.to_string(),
                description: None,
            })
            .await
            .expect("create subject")
    }

    pub async fn subscribe(&self, student_user: &User) {
        self.users
            .set_subscription(
                student_user.id,
                UpdateSubscriptionRequest {
                    status: "active".to_string(),
                    current_period_end: None,
                },
            )
            .await
            .expect("activate subscription");
    }

    /// 订阅并选修给定科目
    pub async fn student_taking(&self, name: &str, subjects: &[&Subject]) -> (User, Student) {
        let (user, student) = self.student(name).await;
        self.subscribe(&user).await;
        for subject in subjects {
            self.subjects
                .enroll(user.id, subject.id)
                .await
                .expect("enroll");
        }
        (user, student)
    }
}

/// 2026-03-02 当天的某个时刻
pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, hour, minute, 0).unwrap()
}

pub fn new_session(
    teacher_id: i64,
    student_id: Option<i64>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> ScheduleWrite {
    ScheduleWrite {
        schedule_id: None,
        teacher_id,
        student_id,
        subject_id: None,
        start_time: start,
        end_time: end,
        title: None,
    }
}

pub fn edit_session(
    schedule_id: i64,
    teacher_id: i64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> ScheduleWrite {
    ScheduleWrite {
        schedule_id: Some(schedule_id),
        ..new_session(teacher_id, None, start, end)
    }
}
