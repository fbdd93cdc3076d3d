//! HTTP surface
//!
//! - `GET /v1/find-country?ip=...` behind the admission gate
//! - `GET /health`, outside the gate

pub mod middleware;
pub mod services;

use std::sync::Arc;

use actix_web::web;

use crate::ratelimit::TokenBucket;
use crate::services::LocationService;
use middleware::AdmissionGate;
use services::{health_routes, lookup_routes};

/// Shared handles every worker's `App` is built from.
#[derive(Clone)]
pub struct AppState {
    pub service: LocationService,
    pub limiter: Arc<TokenBucket>,
}

impl AppState {
    pub fn new(service: LocationService, limiter: Arc<TokenBucket>) -> Self {
        Self { service, limiter }
    }
}

/// Register every route on an `App`.
///
/// ```ignore
/// App::new().configure(ipcountry::api::routes(state.clone()))
/// ```
pub fn routes(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(state.service))
            .service(health_routes())
            .service(
                web::scope("/v1")
                    .wrap(AdmissionGate::new(state.limiter))
                    .service(lookup_routes()),
            );
    }
}
