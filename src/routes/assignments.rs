use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::current_user;
use crate::middlewares;
use crate::models::ApiResponse;
use crate::models::assignments::requests::{AssignStudentsRequest, ReassignStudentsRequest};
use crate::models::users::entities::UserRole;
use crate::services::AssignmentService;
use crate::utils::{SafeStudentIdI64, SafeTeacherIdI64};

// HTTP处理程序
pub async fn assign_students(
    service: web::Data<AssignmentService>,
    body: web::Json<AssignStudentsRequest>,
) -> ActixResult<HttpResponse> {
    let body = body.into_inner();
    let result = service
        .assign_students(body.teacher_id, &body.student_ids)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(result, "Students assigned")))
}

pub async fn unassign_student(
    service: web::Data<AssignmentService>,
    teacher_id: SafeTeacherIdI64,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    service.unassign_student(teacher_id.0, student_id.0).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Student unassigned")))
}

pub async fn unassigned_students(
    service: web::Data<AssignmentService>,
    teacher_id: SafeTeacherIdI64,
) -> ActixResult<HttpResponse> {
    let result = service.get_unassigned_students(teacher_id.0).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(result, "Unassigned students retrieved")))
}

pub async fn my_students(
    req: HttpRequest,
    service: web::Data<AssignmentService>,
) -> ActixResult<HttpResponse> {
    let caller = current_user(&req)?;
    let result = service.get_teacher_students(caller.id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(result, "Students retrieved")))
}

pub async fn reassign_students(
    service: web::Data<AssignmentService>,
    body: web::Json<ReassignStudentsRequest>,
) -> ActixResult<HttpResponse> {
    let body = body.into_inner();
    let result = service
        .reassign_students(body.from_teacher_id, body.to_teacher_id, &body.student_ids)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(result, "Students reassigned")))
}

// 配置路由
pub fn configure_assignment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/mine").route(
                    web::get()
                        .to(my_students)
                        .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                ),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new(&UserRole::Admin))
                    .route("", web::post().to(assign_students))
                    .route("/reassign", web::post().to(reassign_students))
                    .route("/unassigned/{teacher_id}", web::get().to(unassigned_students))
                    .route(
                        "/{teacher_id}/{student_id}",
                        web::delete().to(unassign_student),
                    ),
            ),
    );
}
