pub mod assignments;
pub mod context;
pub mod notifications;
pub mod schedules;
pub mod subjects;
pub mod teachers;
pub mod users;

pub use assignments::AssignmentService;
pub use context::{SchedulingGuard, ServiceContext};
pub use notifications::NotificationDispatcher;
pub use schedules::ScheduleService;
pub use subjects::SubjectService;
pub use teachers::TeacherService;
pub use users::UserService;
