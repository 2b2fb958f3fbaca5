use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::current_user;
use crate::middlewares;
use crate::models::ApiResponse;
use crate::models::subjects::requests::CreateSubjectRequest;
use crate::models::users::entities::UserRole;
use crate::services::SubjectService;
use crate::utils::SafeSubjectIdI64;

// HTTP处理程序
pub async fn list_subjects(service: web::Data<SubjectService>) -> ActixResult<HttpResponse> {
    let result = service.list_subjects().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(result, "Subjects retrieved")))
}

pub async fn create_subject(
    service: web::Data<SubjectService>,
    body: web::Json<CreateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    let subject = service.create_subject(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(subject, "Subject created")))
}

pub async fn enroll(
    req: HttpRequest,
    service: web::Data<SubjectService>,
    subject_id: SafeSubjectIdI64,
) -> ActixResult<HttpResponse> {
    let caller = current_user(&req)?;
    let result = service.enroll(caller.id, subject_id.0).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(result, "Enrolled")))
}

pub async fn enrolled_subjects(
    req: HttpRequest,
    service: web::Data<SubjectService>,
) -> ActixResult<HttpResponse> {
    let caller = current_user(&req)?;
    let result = service.list_enrollments(caller.id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(result, "Enrollments retrieved")))
}

// 配置路由
pub fn configure_subject_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/subjects")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_subjects))
                    .route(
                        web::post()
                            .to(create_subject)
                            .wrap(middlewares::RequireRole::new(&UserRole::Admin)),
                    ),
            )
            .service(
                web::resource("/enrolled").route(
                    web::get()
                        .to(enrolled_subjects)
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            )
            .service(
                web::resource("/{subject_id}/enroll").route(
                    web::post()
                        .to(enroll)
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            ),
    );
}
