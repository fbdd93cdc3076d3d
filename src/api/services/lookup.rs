use actix_web::http::StatusCode;
use actix_web::http::header::ALLOW;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::{debug, trace};

use super::helpers::{error_response, json_response};
use crate::services::{LocationService, ServiceError};

/// First `ip` value in the query string; later repeats are ignored.
///
/// An undecodable query string counts as having no `ip` at all.
fn first_ip_param(query: &str) -> Option<String> {
    web::Query::<Vec<(String, String)>>::from_query(query)
        .ok()?
        .into_inner()
        .into_iter()
        .find(|(key, _)| key == "ip")
        .map(|(_, value)| value)
}

pub struct FindCountryService;

impl FindCountryService {
    /// `GET /v1/find-country?ip=<address>`
    pub async fn find_country(req: HttpRequest, service: web::Data<LocationService>) -> HttpResponse {
        // 重复的 ip 参数取第一个；只有缺失或为空才算缺少参数
        let ip = first_ip_param(req.query_string()).filter(|ip| !ip.is_empty());

        let Some(ip) = ip else {
            trace!("find-country request without ip parameter");
            return error_response(StatusCode::BAD_REQUEST, "missing ip parameter");
        };

        match service.find_country(&ip) {
            Ok(record) => {
                trace!("Resolved {} -> {}, {}", record.address, record.city, record.country);
                json_response(StatusCode::OK, &record)
            }
            Err(e) => {
                debug!("Lookup for {:?} failed: {}", ip, e);
                Self::service_error_response(&e)
            }
        }
    }

    pub async fn method_not_allowed() -> HttpResponse {
        let mut response = error_response(StatusCode::METHOD_NOT_ALLOWED, "method not allowed");
        response
            .headers_mut()
            .insert(ALLOW, actix_web::http::header::HeaderValue::from_static("GET"));
        response
    }

    fn service_error_response(err: &ServiceError) -> HttpResponse {
        match err {
            ServiceError::InvalidAddress => {
                error_response(StatusCode::BAD_REQUEST, "invalid IP address format")
            }
            ServiceError::NotFound => error_response(StatusCode::NOT_FOUND, "IP address not found"),
            ServiceError::Upstream(_) => {
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        }
    }
}

/// Lookup 路由配置（挂在 `/v1` scope 下）
pub fn lookup_routes() -> actix_web::Resource {
    web::resource("/find-country")
        .route(web::get().to(FindCountryService::find_country))
        .default_service(web::route().to(FindCountryService::method_not_allowed))
}
