//! 默认通知实现：只把消息写入日志，真实投递由外部邮件服务完成

use async_trait::async_trait;
use tracing::info;

use super::{ClassScheduledEmail, Notifier, StudentAssignmentEmail, TeacherAssignmentEmail};
use crate::errors::Result;

pub struct TracingNotifier {
    sender: String,
}

impl TracingNotifier {
    pub fn new(sender: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
        }
    }
}

#[async_trait]
impl Notifier for TracingNotifier {
    async fn send_class_schedule_email(&self, email: &ClassScheduledEmail) -> Result<()> {
        info!(
            from = %self.sender,
            to = %email.to,
            teacher = %email.teacher_name,
            subject = email.subject_name.as_deref().unwrap_or("-"),
            start = %email.start_time.to_rfc3339(),
            end = %email.end_time.to_rfc3339(),
            google_calendar = email.calendar.as_ref().map(|c| c.google.as_str()).unwrap_or("-"),
            "Class scheduled for {}",
            email.student_name
        );
        Ok(())
    }

    async fn send_teacher_assignment_email(&self, email: &TeacherAssignmentEmail) -> Result<()> {
        info!(
            from = %self.sender,
            to = %email.to,
            reassigned = email.reassigned,
            subjects = %email.teachable_subjects,
            "{} has been assigned {} student(s): {}",
            email.teacher_name,
            email.student_names.len(),
            email.student_names.join(", ")
        );
        Ok(())
    }

    async fn send_student_assignment_email(&self, email: &StudentAssignmentEmail) -> Result<()> {
        info!(
            from = %self.sender,
            to = %email.to,
            reassigned = email.reassigned,
            teacher_email = %email.teacher_email,
            matching_subjects = %email.matching_subjects,
            "{} has been assigned to {}",
            email.student_name,
            email.teacher_name
        );
        Ok(())
    }
}
