//! Prometheus metrics infrastructure

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use super::config::MetricsConfig;

/// Prometheus metrics handle for serving the metrics endpoint
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: Arc<PrometheusHandle>,
}

impl PrometheusMetrics {
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Installs the global Prometheus recorder
pub fn init_metrics(config: &MetricsConfig) -> Option<PrometheusMetrics> {
    if !config.enabled {
        tracing::info!("Prometheus metrics disabled");
        return None;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            gauge!("cost_data_service_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
            tracing::info!(path = %config.path, "Prometheus metrics initialized");

            Some(PrometheusMetrics {
                handle: Arc::new(handle),
            })
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize Prometheus metrics");
            None
        }
    }
}

pub fn create_metrics_router(metrics: PrometheusMetrics, path: &str) -> Router {
    Router::new()
        .route(path, get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<PrometheusMetrics>) -> impl IntoResponse {
    metrics.render()
}

/// Records one HTTP request; `path` should be the matched route pattern
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];

    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());

    if status >= 500 {
        counter!("http_server_errors_total", &labels).increment(1);
    }
}

/// Records how a country or city lookup was answered
pub fn record_resolution(kind: &'static str, outcome: &'static str, duration: Duration) {
    let labels = [("kind", kind), ("outcome", outcome)];

    counter!("cost_data_resolutions_total", &labels).increment(1);
    histogram!("cost_data_resolution_duration_seconds", &labels).record(duration.as_secs_f64());
}

/// Records one call to a data source
pub fn record_source_call(source: &'static str, outcome: &'static str, duration: Duration) {
    let labels = [("source", source), ("outcome", outcome)];

    counter!("cost_data_source_calls_total", &labels).increment(1);
    histogram!("cost_data_source_duration_seconds", &labels).record(duration.as_secs_f64());
}

/// Records which tier answered a currency rate lookup
pub fn record_currency_lookup(tier: &'static str) {
    counter!("currency_rate_lookups_total", "tier" => tier).increment(1);
}
