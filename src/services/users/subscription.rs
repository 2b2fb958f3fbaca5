use super::UserService;
use crate::errors::{Result, TutorError};
use crate::models::{
    subjects::entities::Subscription,
    users::{entities::UserRole, requests::UpdateSubscriptionRequest},
};

pub async fn set_subscription(
    service: &UserService,
    user_id: i64,
    req: UpdateSubscriptionRequest,
) -> Result<Subscription> {
    let storage = &service.ctx.storage;

    let status = req.status.trim().to_ascii_lowercase();
    if status.is_empty() {
        return Err(TutorError::validation("Subscription status is required"));
    }

    let user = storage
        .get_user_by_id(user_id)
        .await?
        .ok_or_else(|| TutorError::not_found("User not found"))?;
    if user.role != UserRole::Student {
        return Err(TutorError::validation(
            "Subscriptions only apply to student accounts",
        ));
    }

    let student = storage
        .get_student_by_user_id(user.id)
        .await?
        .ok_or_else(|| TutorError::not_found("Student not found"))?;

    storage
        .upsert_subscription(student.id, &status, req.current_period_end)
        .await
}
