//! Event emitter that writes routing events to tracing and Prometheus.

use crepaway_core::{
    events::{EventSeverity, EventType, NavigationEvent},
    traits::EventEmitter,
    types::OrderFlow,
};

use crate::metrics::{track_event, track_flow_switch, track_link};

/// Logs every event at its severity and updates the routing counters.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventEmitter;

impl TracingEventEmitter {
    pub fn new() -> Self {
        Self
    }
}

impl EventEmitter for TracingEventEmitter {
    fn emit(&self, event: NavigationEvent) {
        let kind = event.event_type.as_str();
        let source = event.source.as_deref().unwrap_or("-");

        match event.severity {
            EventSeverity::Debug => {
                tracing::debug!(event_id = %event.id, kind, source, payload = %event.payload, "Routing event")
            }
            EventSeverity::Info => {
                tracing::info!(event_id = %event.id, kind, source, payload = %event.payload, "Routing event")
            }
            EventSeverity::Warning => {
                tracing::warn!(event_id = %event.id, kind, source, payload = %event.payload, "Routing event")
            }
            EventSeverity::Error => {
                tracing::error!(event_id = %event.id, kind, source, payload = %event.payload, "Routing event")
            }
        }

        track_event(event.event_type);
        match event.event_type {
            EventType::LinkReceived => track_link(source, "received"),
            EventType::LinkDiscarded => track_link(source, "discarded"),
            EventType::FlowSwitched => {
                if let Some(flow) = event
                    .payload
                    .get("flow")
                    .and_then(|v| v.as_str())
                    .and_then(|s| s.parse::<OrderFlow>().ok())
                {
                    track_flow_switch(flow);
                }
            }
            _ => {}
        }
    }
}
