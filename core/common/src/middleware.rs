// core/common/src/middleware.rs
// Metrics collection middleware

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

use crate::metrics::{MetricsTimer, ServiceMetrics};

/// Label used when a request did not match any route.
const UNMATCHED_ENDPOINT: &str = "unmatched";

pub struct MetricsMiddleware {
    metrics: Rc<ServiceMetrics>,
}

impl MetricsMiddleware {
    pub fn new(metrics: ServiceMetrics) -> Self {
        Self {
            metrics: Rc::new(metrics),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for MetricsMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = MetricsMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MetricsMiddlewareService {
            service: Rc::new(service),
            metrics: self.metrics.clone(),
        }))
    }
}

pub struct MetricsMiddlewareService<S> {
    service: Rc<S>,
    metrics: Rc<ServiceMetrics>,
}

impl<S, B> Service<ServiceRequest> for MetricsMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let metrics = self.metrics.clone();
        let service = self.service.clone();

        let method = req.method().to_string();

        metrics
            .http_requests_in_progress
            .with_label_values(&[&method])
            .inc();

        let timer = MetricsTimer::new();

        Box::pin(async move {
            let result = service.call(req).await;

            metrics
                .http_requests_in_progress
                .with_label_values(&[&method])
                .dec();

            let duration = timer.elapsed_seconds();

            match &result {
                Ok(response) => {
                    // Route templates keep label cardinality bounded.
                    let endpoint = response
                        .request()
                        .match_pattern()
                        .unwrap_or_else(|| UNMATCHED_ENDPOINT.to_string());
                    let status = response.status().as_u16();
                    metrics.record_http_request(&method, &endpoint, status, duration);
                }
                Err(_) => {
                    metrics.record_http_request(&method, UNMATCHED_ENDPOINT, 500, duration);
                }
            }

            result
        })
    }
}
