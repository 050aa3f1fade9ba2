// core/shorts-service/src/handlers/health.rs
// Health check endpoints

use actix_web::{http::StatusCode, web, HttpResponse, Result};
use ziktok_common::{check_api_key_health, HealthResponse, LivenessProbe, ReadinessProbe};

use crate::state::AppState;

/// Health check endpoint - comprehensive service health
pub async fn health_check(data: web::Data<AppState>) -> Result<HttpResponse> {
    let mut health = HealthResponse::new(
        "shorts-service".to_string(),
        env!("CARGO_PKG_VERSION").to_string(),
        data.start_time,
    )
    .with_features(vec![
        "channel-shorts".to_string(),
        "channel-search".to_string(),
        "shorts-cache".to_string(),
    ])
    .with_cache_entries(data.shorts.cached_entries().await);

    health.add_dependency(check_api_key_health("youtube_api", data.shorts.is_configured()));

    Ok(HttpResponse::Ok().json(health))
}

/// Liveness probe - is the service alive?
pub async fn liveness_probe() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(LivenessProbe::healthy()))
}

/// Readiness probe - without an API key every lookup fails.
pub async fn readiness_probe(data: web::Data<AppState>) -> Result<HttpResponse> {
    let (probe, status) = if data.shorts.is_configured() {
        (ReadinessProbe::ready(), StatusCode::OK)
    } else {
        (ReadinessProbe::not_ready(), StatusCode::SERVICE_UNAVAILABLE)
    };

    Ok(HttpResponse::build(status).json(probe))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shorts::ShortsService;
    use crate::testing::FakePlatform;
    use crate::youtube::VideoPlatform;
    use prometheus::Registry;
    use std::sync::Arc;
    use ziktok_common::ServiceMetrics;

    fn state(configured: bool) -> web::Data<AppState> {
        let registry = Registry::new();
        let metrics = ServiceMetrics::new(&registry, "test_service").unwrap();
        let platform = configured.then(|| Arc::new(FakePlatform::new()) as Arc<dyn VideoPlatform>);
        web::Data::new(AppState::new(
            ShortsService::new(platform, metrics.clone()),
            metrics,
        ))
    }

    #[actix_web::test]
    async fn test_liveness_probe() {
        let response = liveness_probe().await.unwrap();
        assert_eq!(response.status(), 200);
    }

    #[actix_web::test]
    async fn test_health_check_reports_cache_and_key() {
        let response = health_check(state(true)).await.unwrap();
        assert_eq!(response.status(), 200);

        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "shorts-service");
        assert_eq!(json["cache_entries"], 0);
        assert_eq!(json["dependencies"][0]["name"], "youtube_api");
    }

    #[actix_web::test]
    async fn test_health_check_without_key_is_unhealthy_but_200() {
        let response = health_check(state(false)).await.unwrap();
        assert_eq!(response.status(), 200);

        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "unhealthy");
    }

    #[actix_web::test]
    async fn test_readiness_probe() {
        let ready = readiness_probe(state(true)).await.unwrap();
        assert_eq!(ready.status(), 200);

        let not_ready = readiness_probe(state(false)).await.unwrap();
        assert_eq!(not_ready.status(), 503);
    }
}
