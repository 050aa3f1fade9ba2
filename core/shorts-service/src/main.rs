// core/shorts-service/src/main.rs
// Shorts Service - YouTube Shorts aggregation for the ZikTok frontend

mod duration;
mod handlers {
    pub mod channels;
    pub mod health;
    pub mod metrics;
}
mod models;
mod routes;
mod shorts;
mod state;
#[cfg(test)]
mod testing;
mod youtube;

use actix_cors::Cors;
use actix_web::{http::header, middleware, web, App, HttpServer};
use dotenv::dotenv;
use prometheus::Registry;
use std::sync::Arc;
use ziktok_common::{init_logging_with_format, MetricsMiddleware, ServiceConfig, ServiceMetrics};

use crate::shorts::ShortsService;
use crate::state::AppState;
use crate::youtube::{VideoPlatform, YouTubeClient};

// ============================================================================
// MAIN
// ============================================================================

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    println!("🎬 ZikTok - Shorts Service Starting...");

    let config = ServiceConfig::from_env();

    init_logging_with_format("shorts-service", config.log_format);
    tracing::info!(
        environment = %config.environment,
        port = config.port,
        "Starting Shorts Service"
    );

    // YouTube client
    let platform: Option<Arc<dyn VideoPlatform>> = match config.youtube_api_key.as_deref() {
        Some(api_key) => {
            tracing::info!("YouTube API key configured: true");
            let client = YouTubeClient::new(config.youtube_api_base.as_str(), api_key);
            Some(Arc::new(client) as Arc<dyn VideoPlatform>)
        }
        None => {
            tracing::warn!(
                "YouTube API key not found. Set the YOUTUBE_API_KEY environment variable or add it to .env"
            );
            None
        }
    };

    // Prometheus metrics
    let registry = Registry::new();
    let service_metrics = ServiceMetrics::new(&registry, "shorts_service")
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    tracing::info!("Metrics initialized");

    let shorts = ShortsService::new(platform, service_metrics.clone());
    let app_state = web::Data::new(AppState::new(shorts, service_metrics.clone()));
    let registry_data = web::Data::new(registry);
    let cors_origins = config.cors_allowed_origins.clone();

    println!("✅ ZikTok server running on http://localhost:{}", config.port);
    println!("📋 Health: http://localhost:{}/health", config.port);
    println!("📊 Metrics: http://localhost:{}/metrics", config.port);
    tracing::info!("Starting HTTP server...");

    HttpServer::new(move || {
        let cors = cors_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET"])
            .allowed_headers(vec![header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(MetricsMiddleware::new(service_metrics.clone()))
            // Security headers
            .wrap(
                middleware::DefaultHeaders::new()
                    .add(("X-Frame-Options", "DENY"))
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Content-Security-Policy", "default-src 'self'"))
                    .add(("X-XSS-Protection", "1; mode=block")),
            )
            // Request logging
            .wrap(middleware::Logger::default())
            .app_data(app_state.clone())
            .app_data(registry_data.clone())
            .configure(routes::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
