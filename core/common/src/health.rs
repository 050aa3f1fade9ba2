// core/common/src/health.rs
// Health check system for services

use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub service: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub features: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_entries: Option<usize>,
    pub dependencies: Vec<DependencyHealth>,
}

impl HealthResponse {
    pub fn new(service: String, version: String, start_time: SystemTime) -> Self {
        let uptime = SystemTime::now()
            .duration_since(start_time)
            .unwrap_or(Duration::from_secs(0))
            .as_secs();

        Self {
            status: HealthStatus::Healthy,
            service,
            version,
            uptime_seconds: uptime,
            features: Vec::new(),
            cache_entries: None,
            dependencies: Vec::new(),
        }
    }

    pub fn with_features(mut self, features: Vec<String>) -> Self {
        self.features = features;
        self
    }

    pub fn with_cache_entries(mut self, entries: usize) -> Self {
        self.cache_entries = Some(entries);
        self
    }

    pub fn add_dependency(&mut self, dependency: DependencyHealth) {
        self.dependencies.push(dependency);
        self.update_overall_status();
    }

    fn update_overall_status(&mut self) {
        if self.dependencies.is_empty() {
            return;
        }

        let has_unhealthy = self.dependencies.iter().any(|d| d.status == HealthStatus::Unhealthy);
        let has_degraded = self.dependencies.iter().any(|d| d.status == HealthStatus::Degraded);

        if has_unhealthy {
            self.status = HealthStatus::Unhealthy;
        } else if has_degraded {
            self.status = HealthStatus::Degraded;
        } else {
            self.status = HealthStatus::Healthy;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DependencyHealth {
    pub name: String,
    pub status: HealthStatus,
    pub latency_ms: Option<u64>,
    pub message: Option<String>,
}

impl DependencyHealth {
    pub fn new(name: String, status: HealthStatus) -> Self {
        Self {
            name,
            status,
            latency_ms: None,
            message: None,
        }
    }

    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = Some(latency_ms);
        self
    }

    pub fn with_message(mut self, message: String) -> Self {
        self.message = Some(message);
        self
    }
}

/// Reports whether the upstream API can be called at all.
///
/// Does not issue a request: every upstream call costs quota.
pub fn check_api_key_health(name: &str, api_key_configured: bool) -> DependencyHealth {
    if api_key_configured {
        DependencyHealth::new(name.to_string(), HealthStatus::Healthy)
            .with_message("API key configured".to_string())
    } else {
        DependencyHealth::new(name.to_string(), HealthStatus::Unhealthy)
            .with_message("API key not configured".to_string())
    }
}

/// Liveness probe - is the service running?
#[derive(Debug, Clone, Serialize)]
pub struct LivenessProbe {
    pub alive: bool,
}

impl LivenessProbe {
    pub fn healthy() -> Self {
        Self { alive: true }
    }
}

/// Readiness probe - is the service ready to accept traffic?
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessProbe {
    pub ready: bool,
    pub dependencies_ready: bool,
}

impl ReadinessProbe {
    pub fn new(dependencies_ready: bool) -> Self {
        Self {
            ready: dependencies_ready,
            dependencies_ready,
        }
    }

    pub fn ready() -> Self {
        Self::new(true)
    }

    pub fn not_ready() -> Self {
        Self::new(false)
    }
}
