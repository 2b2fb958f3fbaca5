use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::current_user;
use crate::middlewares;
use crate::models::ApiResponse;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::{CreateUserRequest, UpdateSubscriptionRequest};
use crate::services::UserService;
use crate::utils::SafeUserIdI64;

// HTTP处理程序
pub async fn create_user(
    service: web::Data<UserService>,
    body: web::Json<CreateUserRequest>,
) -> ActixResult<HttpResponse> {
    let user = service.create_user(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(user, "User created")))
}

pub async fn get_current_user(req: HttpRequest) -> ActixResult<HttpResponse> {
    let user = current_user(&req)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(user, "User retrieved")))
}

pub async fn get_user(
    service: web::Data<UserService>,
    user_id: SafeUserIdI64,
) -> ActixResult<HttpResponse> {
    let user = service.get_user(user_id.0).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(user, "User retrieved")))
}

pub async fn set_subscription(
    service: web::Data<UserService>,
    user_id: SafeUserIdI64,
    body: web::Json<UpdateSubscriptionRequest>,
) -> ActixResult<HttpResponse> {
    let subscription = service
        .set_subscription(user_id.0, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(subscription, "Subscription updated")))
}

// 配置路由
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/users")
            .wrap(middlewares::RequireJWT)
            .service(web::resource("/me").route(web::get().to(get_current_user)))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new(&UserRole::Admin))
                    .route("", web::post().to(create_user))
                    .route("/{user_id}", web::get().to(get_user))
                    .route("/{user_id}/subscription", web::put().to(set_subscription)),
            ),
    );
}
