use super::TeacherService;
use crate::errors::Result;
use crate::models::teachers::{entities::TeacherStatus, responses::TeacherListResponse};

pub async fn list_applications(
    service: &TeacherService,
    status: Option<TeacherStatus>,
) -> Result<TeacherListResponse> {
    let items = service.ctx.storage.list_teachers(status).await?;
    Ok(TeacherListResponse { items })
}
