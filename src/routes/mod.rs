pub mod assignments;

pub mod schedules;

pub mod subjects;

pub mod system;

pub mod teachers;

pub mod users;

pub use assignments::configure_assignment_routes;
pub use schedules::configure_schedule_routes;
pub use subjects::configure_subject_routes;
pub use system::configure_system_routes;
pub use teachers::configure_teacher_routes;
pub use users::configure_user_routes;

use actix_web::HttpRequest;

use crate::errors::{Result, TutorError};
use crate::middlewares::RequireJWT;
use crate::models::users::entities::User;

// 当前登录用户；路由都在 RequireJWT 之后，缺失说明中间件没有挂载
pub(crate) fn current_user(req: &HttpRequest) -> Result<User> {
    RequireJWT::extract_current_user(req)
        .ok_or_else(|| TutorError::authentication("Authentication required"))
}
