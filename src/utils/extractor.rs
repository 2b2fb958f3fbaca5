//! 路径参数安全提取
//!
//! 只接受正整数 ID，解析失败时返回统一格式的 400 响应，而不是 actix 默认的纯文本错误。

/// 定义一个从路径参数中提取正整数 ID 的类型
///
/// 生成的类型既可以直接作为处理函数参数（按参数名读取），
/// 也可以放在 `web::Path<(A, B)>` 元组中按位置反序列化。
#[macro_export]
macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name(pub i64);

        impl $name {
            fn parse(raw: &str) -> Option<Self> {
                raw.parse::<i64>().ok().filter(|v| *v > 0).map($name)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::parse(&raw).ok_or_else(|| {
                    serde::de::Error::custom(format!("Invalid {}: '{}'", $param, raw))
                })
            }
        }

        impl actix_web::FromRequest for $name {
            type Error = actix_web::Error;
            type Future = std::future::Ready<Result<Self, Self::Error>>;

            fn from_request(
                req: &actix_web::HttpRequest,
                _payload: &mut actix_web::dev::Payload,
            ) -> Self::Future {
                let result = req
                    .match_info()
                    .get($param)
                    .and_then(Self::parse)
                    .ok_or_else(|| {
                        let message = format!("Invalid {}", $param);
                        actix_web::error::InternalError::from_response(
                            message.clone(),
                            actix_web::HttpResponse::BadRequest().json(
                                $crate::models::ApiResponse::error_empty(
                                    $crate::models::ErrorCode::BadRequest,
                                    message,
                                ),
                            ),
                        )
                        .into()
                    });
                std::future::ready(result)
            }
        }
    };
}

define_safe_i64_extractor!(SafeScheduleIdI64, "schedule_id");
define_safe_i64_extractor!(SafeTeacherIdI64, "teacher_id");
define_safe_i64_extractor!(SafeStudentIdI64, "student_id");
define_safe_i64_extractor!(SafeSubjectIdI64, "subject_id");
define_safe_i64_extractor!(SafeUserIdI64, "user_id");

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{FromRequest, test::TestRequest};

    #[actix_web::test]
    async fn test_extracts_positive_id() {
        let (req, mut payload) = TestRequest::default()
            .param("schedule_id", "15")
            .to_http_parts();
        let id = SafeScheduleIdI64::from_request(&req, &mut payload)
            .await
            .unwrap();
        assert_eq!(id.0, 15);
    }

    #[actix_web::test]
    async fn test_rejects_invalid_id() {
        for raw in ["0", "-3", "abc"] {
            let (req, mut payload) = TestRequest::default()
                .param("schedule_id", raw)
                .to_http_parts();
            assert!(
                SafeScheduleIdI64::from_request(&req, &mut payload)
                    .await
                    .is_err()
            );
        }
    }

    #[test]
    fn test_deserialize_in_tuple() {
        let parsed: (SafeTeacherIdI64, SafeStudentIdI64) =
            serde_json::from_str(r#"["4", "9"]"#).unwrap();
        assert_eq!(parsed.0.0, 4);
        assert_eq!(parsed.1.0, 9);
        assert!(serde_json::from_str::<SafeTeacherIdI64>(r#""x""#).is_err());
    }
}
