// core/shorts-service/src/routes.rs
// Route table

use actix_web::web;

use crate::handlers::{channels, health, metrics};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Health endpoints
        .route("/health", web::get().to(health::health_check))
        .route("/liveness", web::get().to(health::liveness_probe))
        .route("/readiness", web::get().to(health::readiness_probe))
        // Metrics endpoint
        .route("/metrics", web::get().to(metrics::metrics_handler))
        // Search is registered first so `search` is never taken for a channel id
        .route("/api/channel/search/{query}", web::get().to(channels::search_channels))
        .route("/api/channel/{channel_id}/shorts", web::get().to(channels::get_shorts));
}
