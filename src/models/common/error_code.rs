// API 业务错误码
//
// 0 表示成功，其余按错误类别划分；具体原因见响应中的 message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    InternalServerError = 1500,
    UpstreamFailed = 1502,
}
