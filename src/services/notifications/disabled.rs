use async_trait::async_trait;
use tracing::debug;

use super::{ClassScheduledEmail, Notifier, StudentAssignmentEmail, TeacherAssignmentEmail};
use crate::errors::Result;

// notifications.enabled = false 时使用，丢弃所有消息
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn send_class_schedule_email(&self, email: &ClassScheduledEmail) -> Result<()> {
        debug!("Notifications disabled, dropping class schedule email to {}", email.to);
        Ok(())
    }

    async fn send_teacher_assignment_email(&self, email: &TeacherAssignmentEmail) -> Result<()> {
        debug!("Notifications disabled, dropping teacher assignment email to {}", email.to);
        Ok(())
    }

    async fn send_student_assignment_email(&self, email: &StudentAssignmentEmail) -> Result<()> {
        debug!("Notifications disabled, dropping student assignment email to {}", email.to);
        Ok(())
    }
}
