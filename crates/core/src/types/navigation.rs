use serde::{Deserialize, Serialize};

// =============================================================================
// Route Names
// =============================================================================

/// Root container for the delivery and takeaway flows.
pub const DELIVERY_TAKEAWAY_ROUTE: &str = "DeliveryTakeaway";

/// Root container for the dine-in flow.
pub const DINE_IN_ROUTE: &str = "DineIn";

/// Nested stack inside dine-in that hosts the order and offer screens.
pub const DINE_IN_ORDER_STACK: &str = "DineInOrderStack";

/// Root shown while the session has no active flow.
pub const FLOW_SELECTION_ROUTE: &str = "OrderTypeSelection";

/// Root shown while the user is logged out.
pub const AUTH_ROUTE: &str = "Auth";

/// Classification of the container's current top-level route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopRoute {
    DeliveryTakeaway,
    DineIn,
    /// Flow selection, auth, or anything unrecognized.
    Other(Option<String>),
}

impl TopRoute {
    pub fn classify(route: Option<&str>) -> Self {
        match route {
            Some(DELIVERY_TAKEAWAY_ROUTE) => Self::DeliveryTakeaway,
            Some(DINE_IN_ROUTE) => Self::DineIn,
            other => Self::Other(other.map(str::to_string)),
        }
    }
}

// =============================================================================
// Navigation Actions
// =============================================================================

/// Parameters handed to a route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
}

impl RouteParams {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_id(id: Option<u64>) -> Self {
        Self { id }
    }
}

/// One entry of a back-stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub name: String,
    #[serde(default)]
    pub params: RouteParams,
}

impl RouteEntry {
    pub fn new(name: impl Into<String>, params: RouteParams) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}

/// Declarative dispatch accepted by a navigation container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NavigationAction {
    /// Nested navigate. `path` runs from the top-level container down to the
    /// leaf screen; `params` belong to the leaf.
    Navigate { path: Vec<String>, params: RouteParams },

    /// Replace the nested stack of `container` so that back walks through
    /// `routes` in reverse. The last route is focused.
    Reset {
        container: String,
        routes: Vec<RouteEntry>,
    },
}

impl NavigationAction {
    /// Top-level container this action targets.
    pub fn container(&self) -> Option<&str> {
        match self {
            Self::Navigate { path, .. } => path.first().map(String::as_str),
            Self::Reset { container, .. } => Some(container.as_str()),
        }
    }

    /// Route name that ends up focused.
    pub fn focused(&self) -> Option<&str> {
        match self {
            Self::Navigate { path, .. } => path.last().map(String::as_str),
            Self::Reset { routes, .. } => routes.last().map(|r| r.name.as_str()),
        }
    }
}
