use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::current_user;
use crate::middlewares;
use crate::models::ApiResponse;
use crate::models::teachers::requests::{
    ApplicationListParams, ReviewApplicationRequest, TeacherApplicationRequest,
    UpdateTeachableSubjectsRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::TeacherService;
use crate::utils::SafeTeacherIdI64;

// HTTP处理程序
pub async fn apply(
    req: HttpRequest,
    service: web::Data<TeacherService>,
    body: web::Json<TeacherApplicationRequest>,
) -> ActixResult<HttpResponse> {
    let caller = current_user(&req)?;
    let teacher = service.apply(caller.id, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(teacher, "Application submitted")))
}

pub async fn list_applications(
    service: web::Data<TeacherService>,
    query: web::Query<ApplicationListParams>,
) -> ActixResult<HttpResponse> {
    let result = service.list_applications(query.into_inner().status).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(result, "Applications retrieved")))
}

pub async fn review_application(
    service: web::Data<TeacherService>,
    teacher_id: SafeTeacherIdI64,
    body: web::Json<ReviewApplicationRequest>,
) -> ActixResult<HttpResponse> {
    let teacher = service.review(teacher_id.0, body.decision).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(teacher, "Application reviewed")))
}

pub async fn update_my_subjects(
    req: HttpRequest,
    service: web::Data<TeacherService>,
    body: web::Json<UpdateTeachableSubjectsRequest>,
) -> ActixResult<HttpResponse> {
    let caller = current_user(&req)?;
    let teacher = service
        .update_teachable_subjects(caller.id, &body.teachable_subjects)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(teacher, "Teachable subjects updated")))
}

// 配置路由
pub fn configure_teacher_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/teachers")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/applications")
                    .route(
                        web::get()
                            .to(list_applications)
                            .wrap(middlewares::RequireRole::new(&UserRole::Admin)),
                    )
                    .route(
                        web::post()
                            .to(apply)
                            .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                    ),
            )
            .service(
                web::resource("/applications/{teacher_id}").route(
                    web::put()
                        .to(review_application)
                        .wrap(middlewares::RequireRole::new(&UserRole::Admin)),
                ),
            )
            .service(
                web::resource("/me/subjects").route(
                    web::put()
                        .to(update_my_subjects)
                        .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                ),
            ),
    );
}
