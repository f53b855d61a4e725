//! JSON API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::LinkdashError;

/// API 错误码枚举
///
/// 序列化为数字，按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 3000-3099: 链接错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    NotFound = 1004,
    InternalServerError = 1005,

    LinkNotFound = 3000,
    LinkAlreadyExists = 3001,
    LinkInvalidUrl = 3002,
    LinkInvalidCode = 3003,
    LinkDatabaseError = 3005,
    LinkCodeExhausted = 3007,
}

impl From<&LinkdashError> for ErrorCode {
    fn from(err: &LinkdashError) -> Self {
        match err {
            LinkdashError::InvalidUrl(_) => ErrorCode::LinkInvalidUrl,
            LinkdashError::InvalidFormat(_) => ErrorCode::LinkInvalidCode,
            LinkdashError::Conflict(_) => ErrorCode::LinkAlreadyExists,
            LinkdashError::AllocationExhausted(_) => ErrorCode::LinkCodeExhausted,
            LinkdashError::NotFound(_) => ErrorCode::LinkNotFound,
            LinkdashError::Store(_)
            | LinkdashError::DatabaseConfig(_)
            | LinkdashError::DatabaseConnection(_) => ErrorCode::LinkDatabaseError,
            LinkdashError::FileOperation(_)
            | LinkdashError::Serialization(_)
            | LinkdashError::Template(_) => ErrorCode::InternalServerError,
        }
    }
}
