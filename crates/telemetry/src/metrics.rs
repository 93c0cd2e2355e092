//! Metrics implementation using Prometheus.

use crepaway_core::{events::EventType, types::OrderFlow, Error, Result};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Initialize Prometheus recorder and return the handle.
pub fn setup_metrics_recorder() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| Error::internal(format!("Failed to install Prometheus recorder: {}", e)))?;

    tracing::info!("Prometheus metrics recorder initialized");
    Ok(handle)
}

/// Count an inbound link by source (`url`, `notification`) and outcome.
pub fn track_link(source: &str, outcome: &str) {
    metrics::counter!(
        "crepaway_links_total",
        "source" => source.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

/// Count a flow switch.
pub fn track_flow_switch(flow: OrderFlow) {
    metrics::counter!("crepaway_flow_switches_total", "flow" => flow.as_str()).increment(1);
}

/// Count a routing event by type.
pub fn track_event(event_type: EventType) {
    metrics::counter!("crepaway_navigation_events_total", "type" => event_type.as_str())
        .increment(1);
}
