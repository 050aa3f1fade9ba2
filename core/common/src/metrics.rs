// core/common/src/metrics.rs
// Prometheus metrics collection

use prometheus::{
    Encoder, Histogram, HistogramOpts, HistogramVec, IntCounterVec, IntGaugeVec, Opts, Registry,
    TextEncoder,
};
use std::time::Instant;

/// Service-wide metrics
#[derive(Clone)]
pub struct ServiceMetrics {
    // HTTP metrics
    pub http_requests_total: IntCounterVec,
    pub http_request_duration_seconds: HistogramVec,
    pub http_requests_in_progress: IntGaugeVec,

    // Error metrics
    pub errors_total: IntCounterVec,

    // Cache and upstream metrics
    pub cache_lookups_total: IntCounterVec,
    pub upstream_requests_total: IntCounterVec,
    pub upstream_request_duration_seconds: HistogramVec,
    pub shorts_returned: Histogram,
}

impl ServiceMetrics {
    pub fn new(registry: &Registry, service_name: &str) -> Result<Self, prometheus::Error> {
        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests")
                .namespace(service_name),
            &["method", "endpoint", "status"],
        )?;
        registry.register(Box::new(http_requests_total.clone()))?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .namespace(service_name)
            .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            &["method", "endpoint"],
        )?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;

        let http_requests_in_progress = IntGaugeVec::new(
            Opts::new("http_requests_in_progress", "Number of HTTP requests currently being processed")
                .namespace(service_name),
            &["method"],
        )?;
        registry.register(Box::new(http_requests_in_progress.clone()))?;

        let errors_total = IntCounterVec::new(
            Opts::new("errors_total", "Total number of errors")
                .namespace(service_name),
            &["type", "operation"],
        )?;
        registry.register(Box::new(errors_total.clone()))?;

        let cache_lookups_total = IntCounterVec::new(
            Opts::new("cache_lookups_total", "Shorts cache lookups by result")
                .namespace(service_name),
            &["result"],
        )?;
        registry.register(Box::new(cache_lookups_total.clone()))?;

        let upstream_requests_total = IntCounterVec::new(
            Opts::new("upstream_requests_total", "Calls to the video platform API")
                .namespace(service_name),
            &["endpoint", "outcome"],
        )?;
        registry.register(Box::new(upstream_requests_total.clone()))?;

        let upstream_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "upstream_request_duration_seconds",
                "Video platform API call duration in seconds",
            )
            .namespace(service_name)
            .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]),
            &["endpoint"],
        )?;
        registry.register(Box::new(upstream_request_duration_seconds.clone()))?;

        let shorts_returned = Histogram::with_opts(
            HistogramOpts::new("shorts_returned", "Shorts returned per pipeline run")
                .namespace(service_name)
                .buckets(vec![0.0, 1.0, 5.0, 10.0, 20.0, 30.0, 50.0]),
        )?;
        registry.register(Box::new(shorts_returned.clone()))?;

        Ok(Self {
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_progress,
            errors_total,
            cache_lookups_total,
            upstream_requests_total,
            upstream_request_duration_seconds,
            shorts_returned,
        })
    }

    /// Record an HTTP request
    pub fn record_http_request(
        &self,
        method: &str,
        endpoint: &str,
        status: u16,
        duration: f64,
    ) {
        self.http_requests_total
            .with_label_values(&[method, endpoint, &status.to_string()])
            .inc();

        self.http_request_duration_seconds
            .with_label_values(&[method, endpoint])
            .observe(duration);
    }

    /// Record an error
    pub fn record_error(&self, error_type: &str, operation: &str) {
        self.errors_total
            .with_label_values(&[error_type, operation])
            .inc();
    }

    pub fn record_cache_lookup(&self, hit: bool) {
        let result = if hit { "hit" } else { "miss" };
        self.cache_lookups_total.with_label_values(&[result]).inc();
    }

    pub fn record_upstream_call(&self, endpoint: &str, outcome: &str, duration: f64) {
        self.upstream_requests_total
            .with_label_values(&[endpoint, outcome])
            .inc();

        self.upstream_request_duration_seconds
            .with_label_values(&[endpoint])
            .observe(duration);
    }

    pub fn record_shorts_returned(&self, count: usize) {
        self.shorts_returned.observe(count as f64);
    }
}

/// Renders every metric in `registry` in the Prometheus text format.
pub fn encode_metrics(registry: &Registry) -> Result<Vec<u8>, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();
    let mut buffer = vec![];
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(buffer)
}

/// Timer to measure operation duration
pub struct MetricsTimer {
    start: Instant,
}

impl MetricsTimer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    pub fn elapsed_millis(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Default for MetricsTimer {
    fn default() -> Self {
        Self::new()
    }
}
