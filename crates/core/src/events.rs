use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Structured record of a routing decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationEvent {
    /// Unique event ID
    pub id: String,
    /// Where the link came from (`url`, `notification`, `replay`, ...)
    pub source: Option<String>,
    /// Timestamp of the event
    pub timestamp: DateTime<Utc>,
    /// Event type category
    pub event_type: EventType,
    /// Event severity level
    pub severity: EventSeverity,
    /// Structured payload (event-specific data)
    pub payload: serde_json::Value,
}

impl NavigationEvent {
    pub fn new(event_type: EventType, payload: serde_json::Value) -> Self {
        let severity = event_type.default_severity();
        Self {
            id: Uuid::new_v4().to_string(),
            source: None,
            timestamp: Utc::now(),
            event_type,
            severity,
            payload,
        }
    }

    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }

    pub fn with_severity(mut self, severity: EventSeverity) -> Self {
        self.severity = severity;
        self
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// Raw link handed to the resolver
    LinkReceived,
    /// Link could not be parsed or named an unknown screen
    LinkDiscarded,
    /// Not logged in, container not ready, or a collaborator failed
    NavigationRejected,
    /// Active flow cleared; the intent was dropped
    FlowCleared,
    /// Session switched to a new flow; intent parked in the pending slot
    FlowSwitched,
    /// Cart holds items from a different flow than the one switched to
    CartFlowConflict,
    /// Final dispatch issued to the navigation container
    NavigationDispatched,
    /// Pending intent taken from the slot after the settle delay
    PendingReplayed,
    /// Pending intent overwritten by a newer switch
    PendingSuperseded,
    /// Pending intent given up after too many settle attempts
    PendingAbandoned,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LinkReceived => "link_received",
            Self::LinkDiscarded => "link_discarded",
            Self::NavigationRejected => "navigation_rejected",
            Self::FlowCleared => "flow_cleared",
            Self::FlowSwitched => "flow_switched",
            Self::CartFlowConflict => "cart_flow_conflict",
            Self::NavigationDispatched => "navigation_dispatched",
            Self::PendingReplayed => "pending_replayed",
            Self::PendingSuperseded => "pending_superseded",
            Self::PendingAbandoned => "pending_abandoned",
        }
    }

    fn default_severity(&self) -> EventSeverity {
        match self {
            Self::LinkDiscarded | Self::NavigationRejected | Self::CartFlowConflict => {
                EventSeverity::Warning
            }
            Self::PendingAbandoned => EventSeverity::Error,
            _ => EventSeverity::Info,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventSeverity {
    Debug,
    Info,
    Warning,
    Error,
}
