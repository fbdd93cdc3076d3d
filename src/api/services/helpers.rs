//! 响应构建帮助函数

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;

pub const CONTENT_TYPE_JSON: &str = "application/json";

/// 错误响应体：`{"error": "..."}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse<'a> {
    pub error: &'a str,
}

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header(("Content-Type", CONTENT_TYPE_JSON))
        .json(body)
}

/// 构建错误响应
pub fn error_response(status: StatusCode, message: &str) -> HttpResponse {
    json_response(status, &ErrorResponse { error: message })
}
