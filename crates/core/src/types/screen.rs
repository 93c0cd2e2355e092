use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Canonical Screens
// =============================================================================

/// Canonical navigation target, independent of how the backend spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Home,
    Offers,
    OfferDetails,
    Cart,
    Checkout,
    Orders,
    OrderDetails,
    TrackOrder,
    Favorites,
    Profile,
    Wallet,
    Notifications,
    Search,
    DineInTable,
    DineInCheckout,
    DineInPending,
    DineInOrder,
}

/// Every canonical screen with its snake identifier and route name.
const SCREEN_NAMES: &[(Screen, &str, &str)] = &[
    (Screen::Home, "home", "Home"),
    (Screen::Offers, "offers", "Offers"),
    (Screen::OfferDetails, "offer_details", "OfferDetails"),
    (Screen::Cart, "cart", "Cart"),
    (Screen::Checkout, "checkout", "Checkout"),
    (Screen::Orders, "orders", "Orders"),
    (Screen::OrderDetails, "order_details", "OrderDetails"),
    (Screen::TrackOrder, "track_order", "TrackOrder"),
    (Screen::Favorites, "favorites", "Favorites"),
    (Screen::Profile, "profile", "Profile"),
    (Screen::Wallet, "wallet", "Wallet"),
    (Screen::Notifications, "notifications", "Notifications"),
    (Screen::Search, "search", "Search"),
    (Screen::DineInTable, "dine_in_table", "DineInTable"),
    (Screen::DineInCheckout, "dine_in_checkout", "DineInCheckout"),
    (Screen::DineInPending, "dine_in_pending", "DineInPending"),
    (Screen::DineInOrder, "dine_in_order", "DineInOrder"),
];

/// Legacy spellings still sent by older backend builds.
const SCREEN_ALIASES: &[(&str, Screen)] = &[
    ("order_tracking", Screen::TrackOrder),
    ("OrderTracking", Screen::TrackOrder),
    ("menu", Screen::Home),
    ("Menu", Screen::Home),
    ("table", Screen::DineInTable),
    ("Table", Screen::DineInTable),
];

/// Prefix shared by the snake names of screens that only exist in dine-in.
const DINE_IN_PREFIX: &str = "dine_in_";

impl Screen {
    /// Resolve a raw screen name (snake identifier, route name, or alias).
    ///
    /// Returns `None` for anything unknown; callers abort navigation rather
    /// than guess.
    pub fn from_name(raw: &str) -> Option<Self> {
        let name = raw.trim();
        if name.is_empty() {
            return None;
        }

        SCREEN_NAMES
            .iter()
            .find(|(_, snake, route)| *snake == name || *route == name)
            .map(|(screen, _, _)| *screen)
            .or_else(|| {
                SCREEN_ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == name)
                    .map(|(_, screen)| *screen)
            })
    }

    /// Snake identifier, e.g. `order_details`.
    pub fn as_str(&self) -> &'static str {
        self.names().0
    }

    /// Route name used by the navigation tree, e.g. `OrderDetails`.
    pub fn route_name(&self) -> &'static str {
        self.names().1
    }

    pub fn is_dine_in_only(&self) -> bool {
        self.as_str().starts_with(DINE_IN_PREFIX)
    }

    /// Detail and tracking screens cannot be shown without an entity id.
    pub fn requires_id(&self) -> bool {
        matches!(self, Self::OfferDetails | Self::OrderDetails | Self::TrackOrder)
    }

    fn names(&self) -> (&'static str, &'static str) {
        SCREEN_NAMES
            .iter()
            .find(|(screen, _, _)| screen == self)
            .map(|(_, snake, route)| (*snake, *route))
            .unwrap_or(("home", "Home"))
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
