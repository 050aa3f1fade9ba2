// core/common/src/logging.rs
// Structured logging with correlation IDs

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, error, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};
use uuid::Uuid;

use crate::config::LogFormat;

lazy_static! {
    static ref API_KEY_PARAM: Regex = Regex::new(r"([?&]key=)[^&#\s)]*").expect("valid regex");
}

/// Initialize structured JSON logging for a service
pub fn init_logging(service_name: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .json()
                .with_target(true)
                .with_thread_ids(true)
                .with_thread_names(true)
                .with_span_events(FmtSpan::CLOSE)
                .with_current_span(true)
        )
        .init();

    info!(
        service = service_name,
        "Logging initialized"
    );
}

/// Initialize simple console logging (for development)
pub fn init_console_logging(service_name: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .pretty()
                .with_target(true)
        )
        .init();

    info!(
        service = service_name,
        "Console logging initialized"
    );
}

pub fn init_logging_with_format(service_name: &str, format: LogFormat) {
    match format {
        LogFormat::Json => init_logging(service_name),
        LogFormat::Pretty => init_console_logging(service_name),
    }
}

/// Generate a correlation ID for request tracing
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Context for structured logging
#[derive(Debug, Clone)]
pub struct LogContext {
    pub request_id: String,
    pub channel_id: Option<String>,
    pub query: Option<String>,
}

impl LogContext {
    pub fn new(request_id: String) -> Self {
        Self {
            request_id,
            channel_id: None,
            query: None,
        }
    }

    pub fn with_channel(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = Some(channel_id.into());
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }
}

/// Log a successful operation
pub fn log_success(ctx: &LogContext, action: &str, details: Option<&str>) {
    info!(
        request_id = %ctx.request_id,
        channel_id = ?ctx.channel_id,
        query = ?ctx.query,
        action = action,
        details = ?details,
        "Operation successful"
    );
}

/// Log a failed operation
pub fn log_failure(ctx: &LogContext, action: &str, error_code: &str, error: &str) {
    error!(
        request_id = %ctx.request_id,
        channel_id = ?ctx.channel_id,
        query = ?ctx.query,
        action = action,
        error_code = error_code,
        error = error,
        "Operation failed"
    );
}

pub fn log_cache_lookup(ctx: &LogContext, cache_key: &str, hit: bool) {
    if hit {
        info!(
            request_id = %ctx.request_id,
            cache_key = cache_key,
            "Cache hit"
        );
    } else {
        debug!(
            request_id = %ctx.request_id,
            cache_key = cache_key,
            "Cache miss"
        );
    }
}

/// Log external API call. The URL is redacted before it is written.
///
/// The request id is carried by the caller's span.
pub fn log_external_api_call(api_name: &str, url: &str, duration_ms: u64, status_code: u16) {
    info!(
        api_name = api_name,
        url = %redact_api_key(url),
        duration_ms = duration_ms,
        status_code = status_code,
        "External API call"
    );
}

/// Masks the value of any `key=` query parameter.
pub fn redact_api_key(url: &str) -> String {
    API_KEY_PARAM.replace_all(url, "${1}[REDACTED]").into_owned()
}
