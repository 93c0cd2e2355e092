use serde::{Deserialize, Serialize};

use super::flow::{MenuType, OrderFlow};

// =============================================================================
// Session State
// =============================================================================

/// Point-in-time view of the client session as seen by the resolver.
///
/// The session is owned by the store and rehydrated at app start; the
/// resolver reads it and mutates individual fields through
/// [`SessionStore`](crate::traits::SessionStore).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSnapshot {
    /// No navigation is performed while this is false.
    pub is_logged_in: bool,

    /// Flow the user picked; `None` means the flow-selection screen is shown.
    pub active_order_flow: Option<OrderFlow>,

    pub menu_type: Option<MenuType>,

    /// Flow the cart contents were added under.
    pub cart_flow: Option<OrderFlow>,

    pub cart_has_items: bool,

    pub selected_branch: Option<u64>,

    pub selected_address: Option<u64>,
}

impl SessionSnapshot {
    /// Logged-in session that has not picked a flow yet.
    pub fn logged_in() -> Self {
        Self {
            is_logged_in: true,
            ..Default::default()
        }
    }

    pub fn with_active_flow(mut self, flow: OrderFlow) -> Self {
        self.active_order_flow = Some(flow);
        self.menu_type = Some(flow.menu_type());
        self
    }

    pub fn with_cart(mut self, flow: OrderFlow, has_items: bool) -> Self {
        self.cart_flow = Some(flow);
        self.cart_has_items = has_items;
        self
    }

    pub fn with_branch(mut self, branch: u64) -> Self {
        self.selected_branch = Some(branch);
        self
    }

    pub fn with_address(mut self, address: u64) -> Self {
        self.selected_address = Some(address);
        self
    }

    /// True when switching to `flow` would leave items from another flow in
    /// the cart.
    pub fn cart_conflicts_with(&self, flow: OrderFlow) -> bool {
        self.cart_has_items && self.cart_flow.is_some_and(|cart| cart != flow)
    }
}
