//! Observability infrastructure - Tracing, Metrics, and Logging

mod config;
mod metrics;
mod tracing_setup;

pub use config::{MetricsConfig, ObservabilityConfig, TracingConfig};
pub use metrics::{
    PrometheusMetrics, create_metrics_router, init_metrics, record_currency_lookup,
    record_http_request, record_resolution, record_source_call,
};
pub use tracing_setup::{init_tracing, shutdown_tracing};
