// core/shorts-service/src/handlers/metrics.rs
// Prometheus metrics endpoint

use actix_web::{web, HttpResponse};
use prometheus::Registry;
use ziktok_common::encode_metrics;

pub async fn metrics_handler(registry: web::Data<Registry>) -> Result<HttpResponse, actix_web::Error> {
    let buffer = encode_metrics(&registry).map_err(actix_web::error::ErrorInternalServerError)?;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(buffer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use ziktok_common::ServiceMetrics;

    #[actix_web::test]
    async fn test_metrics_endpoint_exposes_registry() {
        let registry = Registry::new();
        let metrics = ServiceMetrics::new(&registry, "shorts_service").unwrap();
        metrics.record_cache_lookup(true);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(registry))
                .route("/metrics", web::get().to(metrics_handler)),
        )
        .await;

        let req = test::TestRequest::get().uri("/metrics").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body = test::read_body(resp).await;
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("shorts_service_cache_lookups_total{result=\"hit\"} 1"));
    }
}
