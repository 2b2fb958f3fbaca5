/*!
 * 角色校验中间件
 *
 * 依赖 RequireJWT 写入请求扩展的当前用户，必须挂在其内层。
 *
 * ```rust,ignore
 * web::scope("/assignments")
 *     .wrap(RequireJWT)
 *     .route(
 *         "/reassign",
 *         web::post()
 *             .to(reassign)
 *             .wrap(RequireRole::new(&UserRole::Admin)),
 *     )
 * ```
 *
 * 多个角色任一即可：`RequireRole::new_any(UserRole::teacher_roles())`
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::models::{
    ErrorCode,
    users::entities::{User, UserRole},
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireRole {
    required_roles: Vec<UserRole>,
    require_all: bool, // true表示需要所有角色，false表示任一角色即可
}

impl RequireRole {
    /// 创建需要特定角色的中间件
    pub fn new(role: &UserRole) -> Self {
        Self {
            required_roles: vec![*role],
            require_all: true,
        }
    }

    /// 创建需要任一角色的中间件
    pub fn new_any(roles: &[&UserRole]) -> Self {
        Self {
            required_roles: roles.iter().map(|r| **r).collect(),
            require_all: false,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            required_roles: self.required_roles.clone(),
            require_all: self.require_all,
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    required_roles: Vec<UserRole>,
    require_all: bool,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let required_roles = self.required_roles.clone();
        let require_all = self.require_all;

        Box::pin(async move {
            let caller = req
                .extensions()
                .get::<User>()
                .map(|user| (user.id, user.role));

            match caller {
                Some((_, role))
                    if role_permits(&required_roles, require_all, Some(role)) =>
                {
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                Some((user_id, role)) => {
                    info!(
                        "User {} with role {} denied, requires {:?}",
                        user_id, role, required_roles
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::FORBIDDEN,
                            ErrorCode::Forbidden,
                            "Your role is not allowed to perform this action",
                        )
                        .map_into_right_body(),
                    ))
                }
                None => {
                    info!("Role check reached without an authenticated user");
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Authentication required",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 需要所有角色时通常只传一个角色；任一角色即可时匹配其一
fn role_permits(required: &[UserRole], require_all: bool, role: Option<UserRole>) -> bool {
    if require_all {
        required.iter().all(|r| role == Some(*r))
    } else {
        required.iter().any(|r| role == Some(*r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_role() {
        let roles = [UserRole::Admin];
        assert!(role_permits(&roles, true, Some(UserRole::Admin)));
        assert!(!role_permits(&roles, true, Some(UserRole::Teacher)));
        assert!(!role_permits(&roles, true, None));
    }

    #[test]
    fn test_any_role() {
        let roles: Vec<UserRole> = UserRole::teacher_roles().iter().map(|r| **r).collect();
        assert!(role_permits(&roles, false, Some(UserRole::Teacher)));
        assert!(role_permits(&roles, false, Some(UserRole::Admin)));
        assert!(!role_permits(&roles, false, Some(UserRole::Student)));
    }
}
