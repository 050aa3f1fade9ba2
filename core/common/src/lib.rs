// core/common/src/lib.rs
// ZikTok Common Library - Shared functionality for the backend services

pub mod cache;
pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;

// Re-export commonly used items
pub use cache::{Clock, ManualClock, SystemClock, TtlCache, CACHE_TTL_SECONDS};
pub use config::{Environment, LogFormat, ServiceConfig};
pub use error::{ErrorResponse, ServiceError};
pub use health::{
    check_api_key_health, DependencyHealth, HealthResponse, HealthStatus, LivenessProbe,
    ReadinessProbe,
};
pub use logging::{
    generate_request_id, init_console_logging, init_logging, init_logging_with_format,
    log_cache_lookup, log_external_api_call, log_failure, log_success, redact_api_key, LogContext,
};
pub use metrics::{encode_metrics, MetricsTimer, ServiceMetrics};
pub use middleware::MetricsMiddleware;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_imports() {
        // Test that all modules are accessible
        let _ = ServiceConfig::default();
        let _: TtlCache<String> = TtlCache::new();
        let _ = generate_request_id();
    }
}
