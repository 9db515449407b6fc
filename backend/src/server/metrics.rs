//! Prometheus request metrics served at `/metrics`.

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};

const METRICS_NAMESPACE: &str = "todo_backend";
const METRICS_ENDPOINT: &str = "/metrics";

/// Build the request-metrics middleware.
pub(super) fn build_metrics() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new(METRICS_NAMESPACE)
        .endpoint(METRICS_ENDPOINT)
        .build()
        .map_err(|error| std::io::Error::other(format!("metrics registration failed: {error}")))
}
