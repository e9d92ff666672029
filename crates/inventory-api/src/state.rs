//! Application state

use inventory_db::{AnalyticsSource, Database};
use std::sync::Arc;

/// Prometheus render handle served at `/metrics`
pub type MetricsHandle = metrics_exporter_prometheus::PrometheusHandle;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub analytics: Arc<dyn AnalyticsSource>,
}

impl AppState {
    pub fn new(db: Database, analytics: Arc<dyn AnalyticsSource>) -> Self {
        Self { db, analytics }
    }
}
