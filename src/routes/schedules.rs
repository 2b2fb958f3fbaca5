use actix_web::{HttpRequest, HttpResponse, ResponseError, Result as ActixResult, web};

use super::current_user;
use crate::errors::Result;
use crate::middlewares;
use crate::models::ApiResponse;
use crate::models::schedules::{
    entities::{ScheduleDetail, ScheduleWrite},
    requests::UpsertScheduleRequest,
    responses::{ScheduleListResponse, ScheduleResponse},
};
use crate::models::users::entities::UserRole;
use crate::services::ScheduleService;
use crate::utils::SafeScheduleIdI64;

fn schedule_write(
    schedule_id: Option<i64>,
    teacher_id: i64,
    body: UpsertScheduleRequest,
) -> ScheduleWrite {
    ScheduleWrite {
        schedule_id,
        teacher_id,
        student_id: body.student_id,
        subject_id: body.subject_id,
        start_time: body.start_time,
        end_time: body.end_time,
        title: body.title,
    }
}

// 查询失败时仍返回空列表，前端可以直接渲染
fn schedule_list_response(result: Result<Vec<ScheduleDetail>>) -> HttpResponse {
    match result {
        Ok(schedules) => HttpResponse::Ok().json(ApiResponse::success(
            ScheduleListResponse { schedules },
            "Schedules retrieved",
        )),
        Err(err) => HttpResponse::build(err.status_code()).json(ApiResponse::error(
            err.api_code(),
            ScheduleListResponse {
                schedules: Vec::new(),
            },
            err.message(),
        )),
    }
}

// HTTP处理程序
pub async fn create_schedule(
    req: HttpRequest,
    service: web::Data<ScheduleService>,
    body: web::Json<UpsertScheduleRequest>,
) -> ActixResult<HttpResponse> {
    let caller = current_user(&req)?;
    let body = body.into_inner();
    let teacher_id = service.resolve_teacher_id(&caller, body.teacher_id).await?;

    let schedule = service
        .upsert_schedule(schedule_write(None, teacher_id, body))
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        ScheduleResponse { schedule },
        "Schedule created",
    )))
}

pub async fn update_schedule(
    req: HttpRequest,
    service: web::Data<ScheduleService>,
    schedule_id: SafeScheduleIdI64,
    body: web::Json<UpsertScheduleRequest>,
) -> ActixResult<HttpResponse> {
    let caller = current_user(&req)?;
    let body = body.into_inner();
    let teacher_id = service.resolve_teacher_id(&caller, body.teacher_id).await?;

    let schedule = service
        .upsert_schedule(schedule_write(Some(schedule_id.0), teacher_id, body))
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ScheduleResponse { schedule },
        "Schedule updated",
    )))
}

pub async fn delete_schedule(
    req: HttpRequest,
    service: web::Data<ScheduleService>,
    schedule_id: SafeScheduleIdI64,
) -> ActixResult<HttpResponse> {
    let caller = current_user(&req)?;
    service.delete_schedule(schedule_id.0, caller.id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Schedule deleted")))
}

// 教师看自己的课表，学生看自己的课程，管理员看全部
pub async fn my_schedules(
    req: HttpRequest,
    service: web::Data<ScheduleService>,
) -> ActixResult<HttpResponse> {
    let caller = current_user(&req)?;
    let result = match caller.role {
        UserRole::Teacher => service.get_teacher_schedule(caller.id).await,
        UserRole::Student => service.get_student_schedule(caller.id).await,
        UserRole::Admin => service.get_all_schedules().await,
    };
    Ok(schedule_list_response(result))
}

pub async fn all_schedules(service: web::Data<ScheduleService>) -> ActixResult<HttpResponse> {
    Ok(schedule_list_response(service.get_all_schedules().await))
}

// 配置路由
pub fn configure_schedule_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/schedules")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(all_schedules)
                            .wrap(middlewares::RequireRole::new(&UserRole::Admin)),
                    )
                    .route(
                        web::post()
                            .to(create_schedule)
                            // 教师给自己排课，管理员需要指定教师
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            )
            // 需要在 /{schedule_id} 之前注册
            .service(web::resource("/me").route(web::get().to(my_schedules)))
            .service(
                web::resource("/{schedule_id}")
                    .route(
                        web::put()
                            .to(update_schedule)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_schedule)
                            // 只有课程所属教师可以删除
                            .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                    ),
            ),
    );
}
