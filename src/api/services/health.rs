use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use serde::Serialize;
use tracing::trace;

use super::helpers::json_response;

#[derive(Debug, Serialize)]
struct HealthStatus {
    status: &'static str,
}

/// Health Service
///
/// Liveness only: answers without touching the limiter or the lookup store.
pub struct HealthService;

impl HealthService {
    pub async fn health_check() -> HttpResponse {
        trace!("Received health check request");
        json_response(StatusCode::OK, &HealthStatus { status: "ok" })
    }
}

/// Health 路由配置
pub fn health_routes() -> actix_web::Resource {
    web::resource("/health").to(HealthService::health_check)
}
