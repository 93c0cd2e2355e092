//! Observability for the link resolver.
//!
//! This crate provides:
//! - Tracing subscriber setup (plain or JSON stdout, optional OTLP export)
//! - Prometheus counters for links, flow switches, and routing events
//! - An [`EventEmitter`](crepaway_core::traits::EventEmitter) that feeds both

pub mod emitter;
pub mod metrics;
pub mod tracing_layer;

pub use emitter::TracingEventEmitter;
pub use metrics::{setup_metrics_recorder, track_event, track_flow_switch, track_link};
pub use tracing_layer::configure_tracing;
