use serde::{Deserialize, Serialize};

use super::flow::{MenuType, OrderFlow};
use super::link::NotificationPayload;
use super::screen::Screen;
use crate::error::{Error, Result};

// =============================================================================
// Canonical Intent
// =============================================================================

/// Where the user should end up, resolved from a deep link or a push
/// notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// Canonical target screen.
    pub screen: Screen,

    /// Requested flow; `None` defers to the session's active flow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_flow: Option<OrderFlow>,

    /// Requested menu; `None` mirrors the effective flow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_type: Option<MenuType>,

    /// Entity reference (order id, offer id) for detail screens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<u64>,
}

impl Intent {
    /// Intent for a screen with no flow preference.
    pub fn new(screen: Screen) -> Self {
        Self {
            screen,
            order_flow: None,
            menu_type: None,
            target_id: None,
        }
    }

    /// Fallback used for empty or unrecognized link paths.
    pub fn default_home() -> Self {
        Self::new(Screen::Home).in_flow(OrderFlow::Delivery)
    }

    /// Pin the intent to a flow; the menu type follows the flow.
    pub fn in_flow(mut self, flow: OrderFlow) -> Self {
        self.order_flow = Some(flow);
        self.menu_type = Some(flow.menu_type());
        self
    }

    pub fn with_menu_type(mut self, menu_type: MenuType) -> Self {
        self.menu_type = Some(menu_type);
        self
    }

    pub fn with_target_id(mut self, id: u64) -> Self {
        self.target_id = Some(id);
        self
    }

    /// Decode a push-notification payload.
    ///
    /// The screen must be known; unknown flow or menu strings are treated as
    /// absent. The id may be a JSON number or a numeric string. Detail and
    /// tracking screens need an id; other screens ignore one.
    pub fn from_notification(payload: &NotificationPayload) -> Result<Self> {
        let screen = Screen::from_name(&payload.screen)
            .ok_or_else(|| Error::unknown_screen(payload.screen.clone()))?;

        let order_flow = payload
            .order_type
            .as_deref()
            .and_then(|raw| raw.parse::<OrderFlow>().ok());
        let menu_type = payload
            .menu_type
            .as_deref()
            .and_then(|raw| raw.parse::<MenuType>().ok());
        let target_id = if screen.requires_id() {
            let id = payload
                .id
                .as_ref()
                .ok_or_else(|| Error::invalid_link(format!("{} notification without an id", screen)))?;
            Some(parse_payload_id(id)?)
        } else {
            None
        };

        Ok(Self {
            screen,
            order_flow,
            menu_type,
            target_id,
        })
    }
}

fn parse_payload_id(value: &serde_json::Value) -> Result<u64> {
    match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| Error::invalid_link(format!("id {} is not an unsigned integer", n))),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| Error::invalid_link(format!("id '{}' is not numeric", s))),
        other => Err(Error::invalid_link(format!("unsupported id value {}", other))),
    }
}
