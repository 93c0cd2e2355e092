//! Per-flow stack navigators.
//!
//! A navigator turns a canonical screen into a concrete dispatch for its
//! flow container. Navigators are pure dispatchers: flow and login checks
//! have already happened in the resolver.

use crepaway_core::{
    traits::NavigationContainer,
    types::{
        Intent, NavigationAction, RouteEntry, RouteParams, Screen, DELIVERY_TAKEAWAY_ROUTE,
        DINE_IN_ORDER_STACK, DINE_IN_ROUTE,
    },
    Result,
};

/// Builds and issues the dispatch for one flow container.
pub trait StackNavigator: Send + Sync {
    /// Top-level route the navigator targets.
    fn container_route(&self) -> &'static str;

    /// Dispatch that lands on `screen`.
    fn action(&self, screen: Screen, intent: &Intent) -> NavigationAction;

    fn dispatch(
        &self,
        container: &dyn NavigationContainer,
        screen: Screen,
        intent: &Intent,
    ) -> Result<()> {
        let action = self.action(screen, intent);
        tracing::debug!(
            container = self.container_route(),
            focused = ?action.focused(),
            "Dispatching navigation"
        );
        container.dispatch(action)
    }
}

// =============================================================================
// Delivery / Takeaway
// =============================================================================

/// Back-stack templates, outermost screen first.
const DELIVERY_TAKEAWAY_STACKS: &[(Screen, &[Screen])] = &[
    (Screen::Home, &[Screen::Home]),
    (Screen::Offers, &[Screen::Home, Screen::Offers]),
    (
        Screen::OfferDetails,
        &[Screen::Home, Screen::Offers, Screen::OfferDetails],
    ),
    (Screen::Cart, &[Screen::Home, Screen::Cart]),
    (Screen::Checkout, &[Screen::Home, Screen::Cart, Screen::Checkout]),
    (Screen::Orders, &[Screen::Orders]),
    (Screen::OrderDetails, &[Screen::Orders, Screen::OrderDetails]),
    (Screen::TrackOrder, &[Screen::Orders, Screen::TrackOrder]),
    (Screen::Favorites, &[Screen::Favorites]),
    (Screen::Profile, &[Screen::Profile]),
    (Screen::Wallet, &[Screen::Profile, Screen::Wallet]),
    (Screen::Notifications, &[Screen::Home, Screen::Notifications]),
    (Screen::Search, &[Screen::Home, Screen::Search]),
];

/// Navigator for the shared delivery/takeaway container.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeliveryTakeawayNavigator;

impl DeliveryTakeawayNavigator {
    /// Template for `screen`; unknown screens use the home template.
    pub fn back_stack(screen: Screen) -> &'static [Screen] {
        DELIVERY_TAKEAWAY_STACKS
            .iter()
            .find(|(target, _)| *target == screen)
            .map(|(_, stack)| *stack)
            .unwrap_or(&[Screen::Home])
    }
}

impl StackNavigator for DeliveryTakeawayNavigator {
    fn container_route(&self) -> &'static str {
        DELIVERY_TAKEAWAY_ROUTE
    }

    fn action(&self, screen: Screen, intent: &Intent) -> NavigationAction {
        let mut routes: Vec<RouteEntry> = Self::back_stack(screen)
            .iter()
            .map(|s| RouteEntry::new(s.route_name(), params_for(*s, intent)))
            .collect();

        if routes.len() == 1 {
            let leaf = routes.remove(0);
            NavigationAction::Navigate {
                path: vec![DELIVERY_TAKEAWAY_ROUTE.to_string(), leaf.name],
                params: leaf.params,
            }
        } else {
            NavigationAction::Reset {
                container: DELIVERY_TAKEAWAY_ROUTE.to_string(),
                routes,
            }
        }
    }
}

// =============================================================================
// Dine-In
// =============================================================================

/// Navigator for the dine-in container.
#[derive(Debug, Default, Clone, Copy)]
pub struct DineInNavigator;

impl StackNavigator for DineInNavigator {
    fn container_route(&self) -> &'static str {
        DINE_IN_ROUTE
    }

    fn action(&self, screen: Screen, intent: &Intent) -> NavigationAction {
        let mut path = vec![DINE_IN_ROUTE.to_string()];
        let leaf = match screen {
            Screen::DineInTable | Screen::DineInCheckout | Screen::DineInPending => screen,
            Screen::DineInOrder | Screen::Offers | Screen::OfferDetails => {
                path.push(DINE_IN_ORDER_STACK.to_string());
                screen
            }
            _ => Screen::DineInTable,
        };
        path.push(leaf.route_name().to_string());

        NavigationAction::Navigate {
            path,
            params: params_for(leaf, intent),
        }
    }
}

fn params_for(screen: Screen, intent: &Intent) -> RouteParams {
    if screen.requires_id() {
        RouteParams::with_id(intent.target_id)
    } else {
        RouteParams::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crepaway_core::types::OrderFlow;

    fn names(action: &NavigationAction) -> Vec<String> {
        match action {
            NavigationAction::Navigate { path, .. } => path.clone(),
            NavigationAction::Reset { routes, .. } => routes.iter().map(|r| r.name.clone()).collect(),
        }
    }

    #[test]
    fn test_single_entry_template_navigates() {
        let intent = Intent::new(Screen::Orders).in_flow(OrderFlow::Delivery);
        let action = DeliveryTakeawayNavigator.action(Screen::Orders, &intent);
        assert_eq!(
            action,
            NavigationAction::Navigate {
                path: vec!["DeliveryTakeaway".into(), "Orders".into()],
                params: RouteParams::none(),
            }
        );
    }

    #[test]
    fn test_multi_entry_template_resets_with_back_stack() {
        let intent = Intent::new(Screen::OfferDetails).with_target_id(12);
        let action = DeliveryTakeawayNavigator.action(Screen::OfferDetails, &intent);
        assert_eq!(
            action,
            NavigationAction::Reset {
                container: "DeliveryTakeaway".into(),
                routes: vec![
                    RouteEntry::new("Home", RouteParams::none()),
                    RouteEntry::new("Offers", RouteParams::none()),
                    RouteEntry::new("OfferDetails", RouteParams::with_id(Some(12))),
                ],
            }
        );
    }

    #[test]
    fn test_order_details_template() {
        let intent = Intent::new(Screen::OrderDetails).with_target_id(55);
        let action = DeliveryTakeawayNavigator.action(Screen::OrderDetails, &intent);
        assert_eq!(names(&action), vec!["Orders", "OrderDetails"]);
        if let NavigationAction::Reset { routes, .. } = action {
            assert_eq!(routes[0].params.id, None);
            assert_eq!(routes[1].params.id, Some(55));
        }
    }

    #[test]
    fn test_unknown_delivery_screen_falls_back_to_home() {
        let intent = Intent::new(Screen::DineInCheckout);
        let action = DeliveryTakeawayNavigator.action(Screen::DineInCheckout, &intent);
        assert_eq!(names(&action), vec!["DeliveryTakeaway", "Home"]);
    }

    #[test]
    fn test_dine_in_paths() {
        let intent = Intent::new(Screen::DineInCheckout);
        let action = DineInNavigator.action(Screen::DineInCheckout, &intent);
        assert_eq!(names(&action), vec!["DineIn", "DineInCheckout"]);

        let action = DineInNavigator.action(Screen::DineInOrder, &intent);
        assert_eq!(names(&action), vec!["DineIn", "DineInOrderStack", "DineInOrder"]);

        let offer = Intent::new(Screen::OfferDetails).with_target_id(3);
        let action = DineInNavigator.action(Screen::OfferDetails, &offer);
        assert_eq!(names(&action), vec!["DineIn", "DineInOrderStack", "OfferDetails"]);
        assert_eq!(
            action,
            NavigationAction::Navigate {
                path: vec!["DineIn".into(), "DineInOrderStack".into(), "OfferDetails".into()],
                params: RouteParams::with_id(Some(3)),
            }
        );

        let action = DineInNavigator.action(Screen::Wallet, &intent);
        assert_eq!(names(&action), vec!["DineIn", "DineInTable"]);
    }
}
