//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::LinklisterError;
use crate::services::LinkValidationError;

/// API 错误码
///
/// 使用 serde_repr 序列化为数字，按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 2000-2099: 认证错误
/// - 3000-3099: 链接错误
/// - 4000-4099: 用户错误
/// - 5000-5099: 日志错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    Unauthorized = 1001,
    NotFound = 1004,
    InternalServerError = 1005,

    AuthFailed = 2000,
    RateLimitExceeded = 2004,

    LinkNotFound = 3000,
    LinkAlreadyExists = 3001,
    LinkInvalidUrl = 3002,
    LinkPathTooLong = 3003,
    LinkEmptyPath = 3006,

    UserProtected = 4000,

    LogUnavailable = 5000,
}

impl From<&LinklisterError> for ErrorCode {
    fn from(err: &LinklisterError) -> Self {
        match err {
            LinklisterError::Validation(_) => ErrorCode::BadRequest,
            LinklisterError::NotFound(_) => ErrorCode::NotFound,
            LinklisterError::DuplicateKey(_) => ErrorCode::LinkAlreadyExists,
            LinklisterError::Forbidden(_) => ErrorCode::Unauthorized,
            LinklisterError::AuthFailed(_) => ErrorCode::AuthFailed,
            LinklisterError::Protected(_) => ErrorCode::UserProtected,
            LinklisterError::DatabaseConfig(_)
            | LinklisterError::DatabaseConnection(_)
            | LinklisterError::DatabaseOperation(_)
            | LinklisterError::FileOperation(_)
            | LinklisterError::Serialization(_) => ErrorCode::InternalServerError,
        }
    }
}

impl From<&LinkValidationError> for ErrorCode {
    fn from(err: &LinkValidationError) -> Self {
        match err {
            LinkValidationError::EmptyPath | LinkValidationError::SlashesOnly => {
                ErrorCode::LinkEmptyPath
            }
            LinkValidationError::PathTooLong(_) => ErrorCode::LinkPathTooLong,
            LinkValidationError::InvalidUrl(_) => ErrorCode::LinkInvalidUrl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_number() {
        assert_eq!(serde_json::to_string(&ErrorCode::Success).unwrap(), "0");
        assert_eq!(
            serde_json::to_string(&ErrorCode::LinkAlreadyExists).unwrap(),
            "3001"
        );
        let code: ErrorCode = serde_json::from_str("1001").unwrap();
        assert_eq!(code, ErrorCode::Unauthorized);
    }

    #[test]
    fn test_from_error() {
        assert_eq!(
            ErrorCode::from(&LinklisterError::not_found("x")),
            ErrorCode::NotFound
        );
        assert_eq!(
            ErrorCode::from(&LinklisterError::database_operation("x")),
            ErrorCode::InternalServerError
        );
    }

    #[test]
    fn test_from_link_validation() {
        assert_eq!(
            ErrorCode::from(&LinkValidationError::SlashesOnly),
            ErrorCode::LinkEmptyPath
        );
        assert_eq!(
            ErrorCode::from(&LinkValidationError::PathTooLong(600)),
            ErrorCode::LinkPathTooLong
        );
        assert_eq!(
            ErrorCode::from(&LinkValidationError::InvalidUrl(
                crate::utils::url_validator::UrlValidationError::MissingHost
            )),
            ErrorCode::LinkInvalidUrl
        );
    }
}
