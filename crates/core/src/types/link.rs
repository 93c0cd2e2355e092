use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Inbound Links
// =============================================================================

/// Raw navigation request before parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum InboundLink {
    /// Deep-link URL delivered by the OS.
    Url(String),
    /// Data attached to a tapped push notification.
    Notification(NotificationPayload),
}

impl InboundLink {
    /// Short label used in logs and metrics.
    pub fn source(&self) -> &'static str {
        match self {
            Self::Url(_) => "url",
            Self::Notification(_) => "notification",
        }
    }

    /// Read one line of input: a JSON object is a notification payload,
    /// anything else is a URL.
    pub fn from_line(line: &str) -> crate::Result<Self> {
        let line = line.trim();
        if line.starts_with('{') {
            Ok(Self::Notification(serde_json::from_str(line)?))
        } else {
            Ok(Self::Url(line.to_string()))
        }
    }
}

/// Push-notification data as sent by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPayload {
    /// Screen name, snake or route style.
    pub screen: String,

    #[serde(default)]
    pub order_type: Option<String>,

    #[serde(default)]
    pub menu_type: Option<String>,

    /// Entity id; some senders stringify it.
    #[serde(default)]
    pub id: Option<serde_json::Value>,

    /// Anything else the sender attached. Not used for routing.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl NotificationPayload {
    pub fn new(screen: impl Into<String>) -> Self {
        Self {
            screen: screen.into(),
            order_type: None,
            menu_type: None,
            id: None,
            extra: HashMap::new(),
        }
    }

    pub fn with_order_type(mut self, order_type: impl Into<String>) -> Self {
        self.order_type = Some(order_type.into());
        self
    }

    pub fn with_menu_type(mut self, menu_type: impl Into<String>) -> Self {
        self.menu_type = Some(menu_type.into());
        self
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(serde_json::Value::from(id));
        self
    }
}
