//! 通知端口
//!
//! 核心流程只通过 [`NotificationDispatcher`] 发送通知：发送失败只记录日志，不影响业务结果。

pub mod calendar;
pub mod disabled;
pub mod tracing_notifier;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use tracing::warn;

use crate::errors::Result;
use crate::utils::validate::validate_email;

pub use calendar::CalendarLinks;
pub use disabled::DisabledNotifier;
pub use tracing_notifier::TracingNotifier;

/// 排课成功通知（发给学生）
#[derive(Debug, Clone)]
pub struct ClassScheduledEmail {
    pub to: String,
    pub student_name: String,
    pub teacher_name: String,
    pub subject_name: Option<String>,
    pub title: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub calendar: Option<CalendarLinks>,
}

/// 分配通知（发给教师）
#[derive(Debug, Clone)]
pub struct TeacherAssignmentEmail {
    pub to: String,
    pub teacher_name: String,
    pub student_names: Vec<String>,
    pub teachable_subjects: String,
    /// 来自转移而非新分配
    pub reassigned: bool,
}

/// 分配通知（发给学生）
#[derive(Debug, Clone)]
pub struct StudentAssignmentEmail {
    pub to: String,
    pub student_name: String,
    pub teacher_name: String,
    pub teacher_email: String,
    pub matching_subjects: String,
    pub reassigned: bool,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_class_schedule_email(&self, email: &ClassScheduledEmail) -> Result<()>;
    async fn send_teacher_assignment_email(&self, email: &TeacherAssignmentEmail) -> Result<()>;
    async fn send_student_assignment_email(&self, email: &StudentAssignmentEmail) -> Result<()>;
}

/// 尽力而为的通知分发
#[derive(Clone)]
pub struct NotificationDispatcher {
    notifier: Arc<dyn Notifier>,
    calendar_links: bool,
}

impl NotificationDispatcher {
    pub fn new(notifier: Arc<dyn Notifier>, calendar_links: bool) -> Self {
        Self {
            notifier,
            calendar_links,
        }
    }

    pub fn calendar_links_enabled(&self) -> bool {
        self.calendar_links
    }

    pub async fn class_scheduled(&self, email: ClassScheduledEmail) {
        if !deliverable(&email.to, "class scheduled") {
            return;
        }
        if let Err(e) = self.notifier.send_class_schedule_email(&email).await {
            warn!("Failed to send class schedule email to {}: {}", email.to, e);
        }
    }

    pub async fn teacher_assigned(&self, email: TeacherAssignmentEmail) {
        if !deliverable(&email.to, "teacher assignment") {
            return;
        }
        if let Err(e) = self.notifier.send_teacher_assignment_email(&email).await {
            warn!("Failed to send teacher assignment email to {}: {}", email.to, e);
        }
    }

    /// 学生通知互不依赖，并发发送
    pub async fn students_assigned(&self, emails: Vec<StudentAssignmentEmail>) {
        let sends = emails
            .iter()
            .filter(|email| deliverable(&email.to, "student assignment"))
            .map(|email| async move {
                if let Err(e) = self.notifier.send_student_assignment_email(email).await {
                    warn!("Failed to send student assignment email to {}: {}", email.to, e);
                }
            });
        join_all(sends).await;
    }
}

fn deliverable(to: &str, kind: &str) -> bool {
    match validate_email(to) {
        Ok(()) => true,
        Err(reason) => {
            warn!("Skipping {} email to '{}': {}", kind, to, reason);
            false
        }
    }
}
