//! Request ID middleware
//!
//! 每个请求带一个 request_id，写入 tracing span 和 `X-Request-ID` 响应头。
//! 上游代理已经给出合法的 `X-Request-ID` 时沿用，否则生成 UUID v4。

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::middleware::Next;
use actix_web::Error;
use tracing::{Instrument, info_span};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest inbound id that is accepted as-is
const MAX_REQUEST_ID_LEN: usize = 64;

pub struct RequestIdMiddleware;

impl RequestIdMiddleware {
    /// Use with `actix_web::middleware::from_fn(RequestIdMiddleware::tag)`.
    pub async fn tag(
        req: ServiceRequest,
        next: Next<impl MessageBody>,
    ) -> Result<ServiceResponse<impl MessageBody>, Error> {
        let request_id = accepted_request_id(&req).unwrap_or_else(|| Uuid::new_v4().to_string());
        let span = info_span!(
            "request",
            request_id = %request_id,
            method = %req.method(),
            path = %req.path(),
        );

        let mut response = next.call(req).instrument(span).await?;
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response
                .headers_mut()
                .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
        }
        Ok(response)
    }
}

/// Caller supplied id, when short and limited to `[A-Za-z0-9_-]`.
fn accepted_request_id(req: &ServiceRequest) -> Option<String> {
    let value = req.headers().get(REQUEST_ID_HEADER)?.to_str().ok()?.trim();
    let acceptable = !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    acceptable.then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_accepts_plain_ids() {
        let req = TestRequest::default()
            .insert_header((REQUEST_ID_HEADER, " abc-123_XYZ "))
            .to_srv_request();
        assert_eq!(accepted_request_id(&req).as_deref(), Some("abc-123_XYZ"));
    }

    #[test]
    fn test_rejects_unsafe_or_oversized_ids() {
        let too_long = "a".repeat(MAX_REQUEST_ID_LEN + 1);
        for value in ["", "has space", "semi;colon", too_long.as_str()] {
            let req = TestRequest::default()
                .insert_header((REQUEST_ID_HEADER, value))
                .to_srv_request();
            assert!(accepted_request_id(&req).is_none(), "accepted {:?}", value);
        }

        let req = TestRequest::default().to_srv_request();
        assert!(accepted_request_id(&req).is_none());
    }
}
