// core/shorts-service/src/state.rs
// Shared application state

use std::time::SystemTime;

use ziktok_common::ServiceMetrics;

use crate::shorts::ShortsService;

pub struct AppState {
    pub shorts: ShortsService,
    pub metrics: ServiceMetrics,
    pub start_time: SystemTime,
}

impl AppState {
    pub fn new(shorts: ShortsService, metrics: ServiceMetrics) -> Self {
        Self {
            shorts,
            metrics,
            start_time: SystemTime::now(),
        }
    }
}
