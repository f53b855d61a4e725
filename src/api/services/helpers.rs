//! API 帮助函数

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::config::get_config;
use crate::errors::LinkdashError;

use super::error_code::ErrorCode;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            code,
            message: message.into(),
            data,
        })
}

/// 构建成功响应
pub fn success_response<T: Serialize>(status: StatusCode, data: T) -> HttpResponse {
    json_response(status, ErrorCode::Success, "OK", Some(data))
}

/// 构建错误响应
pub fn error_response(status: StatusCode, error_code: ErrorCode, message: &str) -> HttpResponse {
    json_response::<()>(status, error_code, message, None)
}

/// 从 LinkdashError 构建错误响应（自动映射 HTTP 状态码和 ErrorCode）
pub fn error_from_linkdash(err: &LinkdashError) -> HttpResponse {
    error_response(err.http_status(), ErrorCode::from(err), err.message())
}

/// Base URL that short links are shown under.
///
/// `links.public_base_url` wins; otherwise it is derived from the request.
pub fn public_base_url(req: &HttpRequest) -> String {
    let config = get_config();
    if let Some(base) = config.links.public_base_url.as_deref()
        && !base.is_empty()
    {
        return base.trim_end_matches('/').to_string();
    }
    let conn = req.connection_info();
    format!("{}://{}", conn.scheme(), conn.host())
}
