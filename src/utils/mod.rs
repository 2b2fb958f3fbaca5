pub mod extractor;
pub mod jwt;
pub mod parameter_error_handler;
pub mod validate;

pub use extractor::{
    SafeScheduleIdI64, SafeStudentIdI64, SafeSubjectIdI64, SafeTeacherIdI64, SafeUserIdI64,
};
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
pub use validate::{dedup_ids, validate_email, validate_name};
