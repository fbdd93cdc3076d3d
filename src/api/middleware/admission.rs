//! Admission control middleware
//!
//! Wraps the lookup API. Every request takes a token from the shared bucket
//! before anything else runs; when the bucket is empty the request is answered
//! with 429 and never reaches the handler.

use actix_service::{Service, Transform};
use actix_web::{
    Error,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::sync::Arc;
use tracing::debug;

use crate::api::services::helpers::error_response;
use crate::ratelimit::TokenBucket;

pub const RATE_LIMITED_MESSAGE: &str = "rate limit exceeded";

/// Admission gate factory, one bucket shared by every worker.
#[derive(Clone)]
pub struct AdmissionGate {
    limiter: Arc<TokenBucket>,
}

impl AdmissionGate {
    pub fn new(limiter: Arc<TokenBucket>) -> Self {
        Self { limiter }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AdmissionGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AdmissionGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdmissionGateMiddleware {
            service: Rc::new(service),
            limiter: self.limiter.clone(),
        }))
    }
}

pub struct AdmissionGateMiddleware<S> {
    service: Rc<S>,
    limiter: Arc<TokenBucket>,
}

impl<S, B> Service<ServiceRequest> for AdmissionGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // 在进入 future 之前同步完成准入判断，锁不会跨越 await
        if !self.limiter.allow() {
            debug!("Request rejected by rate limiter: {} {}", req.method(), req.path());
            return Box::pin(async move {
                Ok(req.into_response(
                    error_response(StatusCode::TOO_MANY_REQUESTS, RATE_LIMITED_MESSAGE)
                        .map_into_right_body(),
                ))
            });
        }

        let srv = self.service.clone();
        Box::pin(async move {
            let response = srv.call(req).await?.map_into_left_body();
            Ok(response)
        })
    }
}
