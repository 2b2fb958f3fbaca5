use super::SubjectService;
use crate::errors::{Result, TutorError};
use crate::models::subjects::{entities::Subject, requests::CreateSubjectRequest};

pub async fn create_subject(service: &SubjectService, req: CreateSubjectRequest) -> Result<Subject> {
    let storage = &service.ctx.storage;

    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(TutorError::validation("Subject name is required"));
    }

    if storage.get_subject_by_name(&name).await?.is_some() {
        return Err(TutorError::conflict("Subject already exists"));
    }

    let description = req
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    storage
        .create_subject(CreateSubjectRequest { name, description })
        .await
}
